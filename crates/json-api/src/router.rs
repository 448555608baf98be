//! App Router

use salvo::Router;

use crate::{access, auth};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("gate").get(access::gate::handler))
        .push(Router::with_path("me").get(access::me::handler))
        .push(Router::with_path("navigation").get(access::navigation::handler))
        .push(Router::with_path("sign-out").post(access::sign_out::handler))
}
