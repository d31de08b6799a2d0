use std::time::{Duration, Instant};

use bytes::Bytes;
use log::debug;
use serde::de::DeserializeOwned;
use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_header, with_status, Reply},
};

use crate::access::{self, Intent};
use crate::call::{Annotation, Id, NewCall};
use crate::dictionary::DictionaryKind;
use crate::directory::User;
use crate::environment::Environment;
use crate::errors::CallCenterError;
use crate::export;
use crate::query::{CallsQuery, Query};
use crate::routes::{
    query::RecordingQuery,
    rejection::{Context, Rejection},
    response::SuccessResponse,
};

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($body:tt)*) => {{
        let start = Instant::now();

        let result = { $($body)* };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    }};
}

pub async fn list(environment: Environment, raw: CallsQuery) -> RouteResult {
    timed! {
        let query = Query::from(raw);
        debug!(environment.logger, "Listing calls..."; "filters" => ?query.filters());

        let calls = environment.store.list(&query);

        json(&calls)
    }
}

pub async fn create(environment: Environment, body: Bytes) -> RouteResult {
    timed! {
        let error_handler = |e: CallCenterError| Rejection::new(Context::create(), e);

        let new_call: NewCall = parse_body(&body).map_err(error_handler)?;
        let call = environment.store.create(new_call);
        debug!(environment.logger, "Created call"; "id" => call.id());

        let reply = with_status(json(&call), StatusCode::CREATED);

        match environment.urls.call(call.id()) {
            Ok(location) => Box::new(with_header(reply, "location", location.as_str())) as Box<dyn Reply>,
            Err(_) => Box::new(reply),
        }
    }
}

pub async fn retrieve(environment: Environment, id: String) -> RouteResult {
    timed! {
        let error_handler = |e: CallCenterError| Rejection::new(Context::retrieve(id.clone()), e);

        let call_id = parse_id(&id).map_err(error_handler)?;
        debug!(environment.logger, "Retrieving call..."; "id" => call_id);

        let call = environment.store.get(call_id).map_err(error_handler)?;

        json(&call)
    }
}

pub async fn update(environment: Environment, id: String, body: Bytes) -> RouteResult {
    timed! {
        let error_handler = |e: CallCenterError| Rejection::new(Context::update(id.clone()), e);

        let call_id = parse_id(&id).map_err(error_handler)?;
        let annotation: Annotation = parse_body(&body).map_err(error_handler)?;
        debug!(environment.logger, "Classifying call..."; "id" => call_id);

        let call = environment
            .store
            .update(call_id, annotation)
            .map_err(error_handler)?;

        json(&call)
    }
}

pub async fn recording(
    environment: Environment,
    id: String,
    query: RecordingQuery,
    identity: Option<User>,
) -> RouteResult {
    timed! {
        let error_handler = |e: CallCenterError| Rejection::new(Context::recording(id.clone()), e);

        let call_id = parse_id(&id).map_err(error_handler)?;
        let intent = Intent::from_download_flag(query.download.as_deref());
        debug!(
            environment.logger,
            "Retrieving recording...";
            "id" => call_id,
            "intent" => ?intent,
            "user" => identity.as_ref().map(|user| user.id)
        );

        let call = environment.store.get(call_id).map_err(error_handler)?;
        let url = access::authorize_recording(identity.as_ref(), &call, intent)
            .map_err(error_handler)?;

        json(&SuccessResponse::Recording { url })
    }
}

pub async fn users_list(environment: Environment) -> RouteResult {
    timed! {
        json(&environment.directory.users())
    }
}

pub async fn dictionary(environment: Environment, kind: DictionaryKind) -> RouteResult {
    timed! {
        json(&environment.dictionaries.entries(kind))
    }
}

pub async fn export_csv(environment: Environment) -> RouteResult {
    timed! {
        let calls = environment.store.export_all();
        debug!(environment.logger, "Exporting calls..."; "count" => calls.len());

        with_header(
            export::to_csv(&calls),
            "content-type",
            mime::TEXT_CSV.as_ref(),
        )
    }
}

/// Parses a call ID from a path segment.
fn parse_id(raw: &str) -> Result<Id, CallCenterError> {
    raw.parse()
        .map_err(|_| CallCenterError::InvalidId(raw.to_owned()))
}

/// Decodes a JSON body. An empty body stands for an empty object.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, CallCenterError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body).map_err(|source| CallCenterError::MalformedBody { source })
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
