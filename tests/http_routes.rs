mod common;

use reqwest::StatusCode;

use common::{client, insert, new_event, seed_city, set_status, spawn_app, test_pool};

#[tokio::test]
async fn home_lists_active_cities() {
    let pool = test_pool().await;
    seed_city(&pool, "toronto", "Toronto", None).await;
    seed_city(&pool, "vancouver", "Vancouver", None).await;
    let base = spawn_app(pool, None).await;

    let res = client().get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("cache-control").and_then(|v| v.to_str().ok()),
        Some("no-store")
    );
    let body = res.text().await.unwrap();
    assert!(body.contains("Toronto"));
    assert!(body.contains("href=\"/city/vancouver\""));
}

#[tokio::test]
async fn unknown_pages_are_not_found() {
    let pool = test_pool().await;
    let base = spawn_app(pool, None).await;
    let client = client();

    for path in ["/city/atlantis", "/event/nope", "/no/such/page"] {
        let res = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", path);
    }
}

#[tokio::test]
async fn city_page_hides_rejected_events() {
    let pool = test_pool().await;
    seed_city(&pool, "toronto", "Toronto", None).await;
    insert(&pool, new_event("kept", "toronto", 3)).await;
    insert(&pool, new_event("dropped", "toronto", 4)).await;
    set_status(&pool, "dropped", "rejected", false).await;
    let base = spawn_app(pool, None).await;

    let body = client()
        .get(format!("{}/city/toronto", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Match kept"));
    assert!(!body.contains("Match dropped"));
}

#[tokio::test]
async fn invalid_submission_shows_the_first_problem() {
    let pool = test_pool().await;
    seed_city(&pool, "toronto", "Toronto", None).await;
    let base = spawn_app(pool, None).await;

    let res = client()
        .post(format!("{}/submit", base))
        .form(&[
            ("event_type", "watch_party"),
            ("city_id", ""),
            ("venue_name", "Café Atlas"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("Pick a city."));
    assert!(body.contains("value=\"Café Atlas\""));
}

#[tokio::test]
async fn valid_submission_clears_the_form() {
    let pool = test_pool().await;
    seed_city(&pool, "toronto", "Toronto", None).await;
    let base = spawn_app(pool.clone(), None).await;

    let body = client()
        .post(format!("{}/submit", base))
        .form(&[
            ("event_type", "meetup"),
            ("city_id", "toronto"),
            ("title", "Supporters Brunch"),
            ("starts_at_local", "2030-06-15T11:00"),
            ("venue_name", "Maple Diner"),
            ("venue_type", "bar"),
            ("general_area", "Near stadium"),
            ("tags", "family_friendly"),
            ("tags", "alcohol_free"),
            ("tz_offset_minutes", "240"),
        ])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Submitted! Go check the city page."));
    assert!(!body.contains("Maple Diner"));

    let (title, tags): (String, String) =
        sqlx::query_as("SELECT title, tags FROM events WHERE venue_name = 'Maple Diner'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(title, "Supporters Brunch");
    assert_eq!(tags, r#"["family_friendly","alcohol_free"]"#);
}

#[tokio::test]
async fn admin_without_the_right_key_is_not_found() {
    let pool = test_pool().await;
    let base = spawn_app(pool.clone(), Some("s3cret")).await;
    let client = client();

    for path in ["/admin", "/admin?key=wrong", "/admin?key="] {
        let res = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", path);
    }

    let res = client
        .get(format!("{}/admin?key=s3cret", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.text().await.unwrap().contains("Pending events"));
}

#[tokio::test]
async fn admin_is_unreachable_without_a_configured_key() {
    let pool = test_pool().await;
    let base = spawn_app(pool, None).await;

    let res = client()
        .get(format!("{}/admin?key=anything", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn moderation_action_redirects_back_to_admin() {
    let pool = test_pool().await;
    seed_city(&pool, "toronto", "Toronto", None).await;
    insert(&pool, new_event("e1", "toronto", 3)).await;
    let base = spawn_app(pool.clone(), Some("s3cret")).await;
    let client = client();

    let res = client
        .post(format!("{}/admin/events/e1/feature?key=s3cret", base))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_redirection());
    assert_eq!(
        res.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/admin?key=s3cret")
    );

    let (status, featured): (String, bool) =
        sqlx::query_as("SELECT status, is_featured FROM events WHERE id = 'e1'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "approved");
    assert!(featured);

    let res = client
        .post(format!("{}/admin/events/e1/delete?key=s3cret", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/admin/events/missing/approve?key=s3cret", base))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_choice_values_still_render_the_form() {
    let pool = test_pool().await;
    seed_city(&pool, "toronto", "Toronto", None).await;
    let base = spawn_app(pool, None).await;

    let res = client()
        .post(format!("{}/submit", base))
        .form(&[
            ("event_type", "concert"),
            ("venue_type", "stadium"),
            ("city_id", ""),
            ("venue_name", "Café Atlas"),
            ("tags", "vip_only"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.text().await.unwrap();
    assert!(body.contains("Pick a city."));
    assert!(body.contains("value=\"Café Atlas\""));
}

#[tokio::test]
async fn city_lookup_failure_is_not_found() {
    let pool = test_pool().await;
    seed_city(&pool, "toronto", "Toronto", None).await;
    sqlx::query("DROP TABLE cities").execute(&pool).await.unwrap();
    let base = spawn_app(pool, None).await;
    let client = client();

    for path in ["/city/toronto", "/city/toronto/essentials"] {
        let res = client.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", path);
    }
}
