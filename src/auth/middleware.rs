use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures::future::LocalBoxFuture;

use crate::{
    auth::{AuthPolicy, Claims},
    errors::AppError,
};

/// Authenticates every request in the wrapped scope with the registered `AuthPolicy`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let outcome = match req.app_data::<web::Data<AuthPolicy>>() {
                Some(policy) => {
                    let header = req
                        .headers()
                        .get(AUTHORIZATION)
                        .and_then(|h| h.to_str().ok());
                    policy.authenticate(header)
                }
                None => Err(AppError::InternalError(
                    "Authentication policy not configured".to_string(),
                )),
            };

            match outcome {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::debug!("Rejected {} {}: {}", req.method(), req.path(), err);
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

// Extractor for the authenticated caller in handlers
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{get, http::StatusCode, test, App, HttpResponse};
    use secrecy::SecretString;

    use crate::auth::JwtService;

    #[get("/whoami")]
    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.0.sub)
    }

    #[actix_web::test]
    async fn open_policy_serves_anonymous_caller() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AuthPolicy::Open))
                .service(web::scope("").wrap(AuthMiddleware).service(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn session_policy_rejects_missing_token_with_json_error() {
        let jwt_service = JwtService::new(&SecretString::from("k".repeat(40)), 1);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AuthPolicy::Session(jwt_service.clone())))
                .service(web::scope("").wrap(AuthMiddleware).service(whoami)),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let token = jwt_service.create_token("learner-7").unwrap();
        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "learner-7");
    }
}
