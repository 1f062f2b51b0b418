//! JWT authentication middleware for protecting API endpoints.
//!
//! This middleware extracts the bearer token from the Authorization header,
//! authenticates it against the user directory through the token authority
//! registered as `web::Data<dyn Authenticator>`, and injects the
//! authenticated `User` into the request for `web::ReqData<User>`.
//!
//! A missing header, a malformed header and a rejected token all produce
//! the same 401 response.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use ev_core::services::token::{extract_bearer, Authenticator};

use crate::handlers::error::{handle_auth_error, internal_error, unauthorized};

/// JWT authentication middleware factory
#[derive(Default)]
pub struct JwtAuth;

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match bearer_token(&req) {
                Some(token) => token,
                None => {
                    log::debug!("Request rejected: missing or malformed Authorization header");
                    return Ok(req.into_response(unauthorized()).map_into_right_body());
                }
            };

            let authenticator = match req.app_data::<web::Data<dyn Authenticator>>().cloned() {
                Some(authenticator) => authenticator,
                None => {
                    log::error!("JwtAuth used without a registered Authenticator");
                    return Ok(req.into_response(internal_error()).map_into_right_body());
                }
            };

            let user = match authenticator.authenticate(&token).await {
                Ok(user) => user,
                Err(e) => {
                    return Ok(req.into_response(handle_auth_error(&e)).map_into_right_body())
                }
            };

            req.extensions_mut().insert(user);

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extracts the bearer token from the Authorization header
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    extract_bearer(header).map(str::to_string)
}
