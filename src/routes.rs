use crate::{
    api::{attendance, employee, employee_me, salary},
    auth::handlers,
    config::Config,
    error::ApiError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use std::sync::Arc;

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok", "service": "worktrack-api" }))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    let api_prefix = config.api_prefix.clone();

    // Config is injected once here; handlers and extractors read it from
    // app data, never from the process environment.
    cfg.app_data(web::Data::new(config));

    // Malformed JSON bodies resolve through the same taxonomy as every
    // other client error.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::InvalidInput(err.to_string()).into()),
    );

    cfg.service(web::resource(format!("{api_prefix}/health")).route(web::get().to(health)));

    // Public routes
    cfg.service(
        web::scope(&format!("{api_prefix}/auth"))
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/employee-login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::employee_login)),
            ),
    );

    // Protected routes; role checks live in the AdminUser/EmployeeUser
    // extractors on each handler
    cfg.service(
        web::scope(&api_prefix)
            .wrap(protected_limiter) // rate limiting
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::get().to(employee::list_employees))
                            .route(web::post().to(employee::create_employee)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/employee")
                    // /employee/me/*
                    .service(
                        web::resource("/me/attendance")
                            .route(web::get().to(employee_me::my_attendance)),
                    )
                    .service(
                        web::resource("/me/salary").route(web::get().to(employee_me::my_salary)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(web::resource("").route(web::post().to(attendance::mark_attendance)))
                    // /attendance/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(attendance::attendance_by_employee)),
                    ),
            )
            .service(
                web::scope("/salary")
                    // /salary
                    .service(web::resource("").route(web::get().to(salary::salary_report)))
                    // /salary/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(salary::salary_for_employee)),
                    ),
            ),
    );
}
