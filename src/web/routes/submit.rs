use askama::Template;
use axum::{extract::State, response::Html};
use axum_extra::extract::Form;
use sqlx::SqlitePool;

use crate::error::{render, AppResult};
use crate::services::submission_service::{self, SubmissionDraft, SubmitNotice, SubmitPageData};

const SUBMITTED_MESSAGE: &str = "Submitted! Go check the city page.";

#[derive(Template)]
#[template(path = "submit.html")]
pub struct SubmitTemplate {
    pub page: SubmitPageData,
}

pub async fn submit_page_handler(State(pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let page = submission_service::build_submit_page(&pool, None, None).await;
    render(&SubmitTemplate { page })
}

// Form uses serde_html_form so the repeated `tags` checkboxes collect into a Vec.
pub async fn submit_handler(
    State(pool): State<SqlitePool>,
    Form(mut draft): Form<SubmissionDraft>,
) -> AppResult<Html<String>> {
    let notice = match submission_service::submit(&pool, &draft).await {
        Ok(_) => {
            draft.reset_after_submit();
            SubmitNotice {
                message: SUBMITTED_MESSAGE.to_string(),
                is_error: false,
            }
        }
        Err(e) => SubmitNotice {
            message: e.to_string(),
            is_error: true,
        },
    };

    let page = submission_service::build_submit_page(&pool, Some(draft), Some(notice)).await;
    render(&SubmitTemplate { page })
}
