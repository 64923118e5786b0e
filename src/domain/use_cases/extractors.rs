use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::{entities::token::Claims, errors::AuthError};

/// The authenticated caller, taken from the claims the auth middleware verified.
/// Returns 401 when the request carries no valid claims.
/// Usage: add `requester: Requester` as a handler parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester(pub Uuid);

impl Requester {
    pub fn id(&self) -> &Uuid {
        &self.0
    }
}

impl FromRequest for Requester {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<Claims>() {
            Some(claims) => claims.requester_id().map(Requester),
            None => Err(AuthError::MissingCredentials),
        };
        ready(result.map_err(Into::into))
    }
}
