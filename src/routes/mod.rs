use actix_web::web;

use crate::error::ApiError;

pub mod admin;
pub mod public;

/// Registers the whole HTTP surface. Several paths mix a public method with
/// an admin-only one, so each path is declared exactly once here and the
/// admin handlers gate themselves through the `AuthAdmin` extractor.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // malformed bodies answer with the same JSON error shape as the handlers
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid request body: {err}")).into()
    }))
    .service(
        web::resource("/servicos")
            .route(web::get().to(public::list_services))
            .route(web::post().to(admin::create_service)),
    )
    .service(web::resource("/servicos/{id}").route(web::delete().to(admin::delete_service)))
    .service(web::resource("/horarios").route(web::get().to(public::list_slots)))
    .service(web::resource("/horarios/gerar-semana").route(web::post().to(admin::generate_week)))
    .service(
        web::resource("/agendamentos")
            .route(web::post().to(public::create_appointment))
            .route(web::get().to(admin::list_appointments)),
    )
    .service(web::resource("/agendamentos/{id}").route(web::delete().to(admin::cancel_appointment)))
    .service(web::resource("/login").route(web::post().to(public::login)))
    .service(web::resource("/health").route(web::get().to(public::health)));
}
