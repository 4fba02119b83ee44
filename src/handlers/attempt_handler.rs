use actix_web::{get, http::header, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_author, AuthenticatedUser},
    errors::AppError,
    models::dto::{
        request::SubmitAnswersRequest,
        response::{AttemptResultDto, AttemptStatusResponse},
    },
    services::{ResultOutcome, SubmitOutcome, ViewOutcome},
};

pub fn result_url(quiz_id: &str) -> String {
    format!("/api/quizzes/{}/result", quiz_id)
}

/// 303 to the stored result, used wherever an attempt already exists.
fn redirect_to_result(quiz_id: &str) -> HttpResponse {
    let url = result_url(quiz_id);
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, url.clone()))
        .json(AttemptStatusResponse::already_attempted(url))
}

#[get("/quizzes")]
async fn list_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.attempt_service.list_quizzes(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quizzes/{quiz_id}")]
async fn view_quiz(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    match state
        .attempt_service
        .view_quiz(auth.user_id(), &quiz_id)
        .await?
    {
        ViewOutcome::Available(quiz) => Ok(HttpResponse::Ok().json(quiz)),
        ViewOutcome::AlreadyAttempted => Ok(redirect_to_result(&quiz_id)),
    }
}

#[post("/quizzes/{quiz_id}/attempt")]
async fn submit_attempt(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    request: web::Json<SubmitAnswersRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let answers = request.into_inner().into_answer_set()?;

    match state
        .attempt_service
        .submit_attempt(auth.user_id(), &quiz_id, &answers)
        .await?
    {
        SubmitOutcome::Recorded(record) => {
            Ok(HttpResponse::Created().json(AttemptResultDto::from(record)))
        }
        SubmitOutcome::AlreadyAttempted => Ok(redirect_to_result(&quiz_id)),
    }
}

#[get("/quizzes/{quiz_id}/result")]
async fn get_result(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    match state
        .attempt_service
        .get_result(auth.user_id(), &quiz_id)
        .await?
    {
        ResultOutcome::Attempted(record) => Ok(HttpResponse::Ok().json(AttemptResultDto::from(record))),
        ResultOutcome::NotAttempted => {
            Ok(HttpResponse::NotFound().json(AttemptStatusResponse::not_attempted()))
        }
    }
}

#[get("/quizzes/{quiz_id}/results")]
async fn quiz_results(
    state: web::Data<AppState>,
    quiz_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_author(&auth.0)?;

    let results = state.attempt_service.quiz_results(&quiz_id).await?;
    Ok(HttpResponse::Ok().json(results))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_url() {
        assert_eq!(result_url("quiz-7"), "/api/quizzes/quiz-7/result");
    }

    #[test]
    fn test_redirect_points_at_result() {
        let resp = redirect_to_result("quiz-7");
        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some("/api/quizzes/quiz-7/result")
        );
    }
}
