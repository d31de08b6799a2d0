use std::sync::Arc;

use log::{error, Logger};
use warp::http::StatusCode;
use warp::reject;
use warp::reply::{json, with_status, Reply};

use crate::errors::CallCenterError;

pub mod admin;
mod handlers;
mod query;
mod rejection;
mod response;

pub use internal::*;

/// Header carrying the numeric ID of the user making the request.
pub const IDENTITY_HEADER: &str = "x-user-id";

pub async fn format_rejection(
    logger: Arc<Logger>,
    rej: reject::Rejection,
) -> Result<Box<dyn Reply>, reject::Rejection> {
    if let Some(r) = rej.find::<rejection::Rejection>() {
        let status = status_code_for(&r.error);
        error!(logger, "Request failed"; "context" => ?r.context, "error" => ?r.error, "status" => %status, "message" => %r.error);

        let reply: Box<dyn Reply> = match r.body() {
            Some(body) => Box::new(with_status(json(&body), status)),
            None => Box::new(status),
        };

        return Ok(reply);
    }

    Err(rej)
}

fn status_code_for(e: &CallCenterError) -> StatusCode {
    use CallCenterError::*;

    match e {
        NotFound(..) | InvalidId(..) | NoRecording(..) => StatusCode::NOT_FOUND,
        Validation(..) | MalformedBody { .. } => StatusCode::BAD_REQUEST,
        Forbidden => StatusCode::FORBIDDEN,
    }
}

mod internal {
    use warp::filters::BoxedFilter;
    use warp::path::end;
    use warp::Filter;
    use warp::Reply;
    use warp::{body, get as g, header, path as p, path::param as par, post, put, query};

    use super::{format_rejection, handlers, query as q, IDENTITY_HEADER};
    use crate::dictionary::DictionaryKind;
    use crate::directory::User;
    use crate::environment::Environment;
    use crate::query::CallsQuery;

    type Route = BoxedFilter<(Box<dyn Reply>,)>;

    macro_rules! route_filter {
        ($route_variable:ident; $first:expr) => (let $route_variable = $route_variable.and($first););
        ($route_variable:ident; $first:expr, $($rest:expr),+) => (
            let $route_variable = $route_variable.and($first);
            route_filter!($route_variable; $($rest),+);
        )
    }

    macro_rules! route {
        ($name:ident => $handler:ident, $environment:ident, $route_variable:ident; $($filters:expr),+) => (
            pub fn $name($environment: Environment) -> Route {
                let $route_variable = {
                    let environment = $environment.clone();
                    warp::any().map(move || environment.clone())
                };

                route_filter!($route_variable; $($filters),+);

                $route_variable.and_then(handlers::$handler)
                    .boxed()
            }
        );
    }

    fn calls(environment: &Environment) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
        p(environment.urls.calls_path.clone())
    }

    /// Resolves the caller from the identity header. Unknown or malformed
    /// IDs resolve to nobody.
    fn identity(
        environment: &Environment,
    ) -> impl Filter<Extract = (Option<User>,), Error = warp::Rejection> + Clone {
        let directory = environment.directory.clone();

        header::optional::<String>(IDENTITY_HEADER)
            .map(move |raw: Option<String>| directory.resolve(raw.as_deref()))
    }

    route!(make_list_route => list, env, rt; calls(&env), end(), g(), query::<CallsQuery>());
    route!(make_create_route => create, env, rt; calls(&env), end(), post(), body::bytes());
    route!(make_retrieve_route => retrieve, env, rt; calls(&env), par::<String>(), end(), g());
    route!(make_update_route => update, env, rt; calls(&env), par::<String>(), end(), put(), body::bytes());
    route!(make_recording_route => recording, env, rt; calls(&env), par::<String>(), p("recording"), end(), g(), query::<q::RecordingQuery>(), identity(&env));
    route!(make_users_route => users_list, env, rt; p("users"), end(), g());
    route!(make_dictionary_route => dictionary, env, rt; p("dictionaries"), par::<DictionaryKind>(), end(), g());
    route!(make_export_route => export_csv, env, rt; p("export"), p("calls.csv"), end(), g());

    /// Combines every public route, with rejections formatted for clients.
    pub fn make_api(environment: Environment) -> Route {
        let logger = environment.logger.clone();

        make_list_route(environment.clone())
            .or(make_create_route(environment.clone()))
            .unify()
            .or(make_retrieve_route(environment.clone()))
            .unify()
            .or(make_update_route(environment.clone()))
            .unify()
            .or(make_recording_route(environment.clone()))
            .unify()
            .or(make_users_route(environment.clone()))
            .unify()
            .or(make_dictionary_route(environment.clone()))
            .unify()
            .or(make_export_route(environment))
            .unify()
            .recover(move |r| format_rejection(logger.clone(), r))
            .unify()
            .boxed()
    }
}
