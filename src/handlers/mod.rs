pub mod attempt_handler;
pub mod health_handler;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::{auth::AuthMiddleware, errors::AppError};

pub use attempt_handler::{get_result, list_quizzes, quiz_results, submit_attempt, view_quiz};
pub use health_handler::{health_check, health_check_live, health_check_ready};

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid request body: {}", err)).into()
}

/// Registers every route. Health probes are public; everything under `/api`
/// requires a bearer token.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(
            web::scope("/api")
                .wrap(AuthMiddleware)
                .service(list_quizzes)
                .service(view_quiz)
                .service(submit_attempt)
                .service(get_result)
                .service(quiz_results),
        );
}
