use std::{any::Any, sync::Arc};

use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::web::{log, Error, REQUEST_ID_HEADER};

/// Turns an `Error` stashed in the response extensions into the client facing JSON body
/// and logs the request.
pub async fn response_mapper(req_method: Method, uri: Uri, resp: Response) -> Response {
    let req_id = resp.headers().get(REQUEST_ID_HEADER).cloned();

    let web_error = resp.extensions().get::<Arc<Error>>().map(|er| er.as_ref());
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    let err_resp = client_status_and_error.as_ref().map(|(status, cl_err)| {
        let mut err_resp = (*status, Json(cl_err.body())).into_response();
        // Keep the request id on the replaced response.
        if let Some(req_id) = req_id.clone() {
            err_resp.headers_mut().insert(REQUEST_ID_HEADER, req_id);
        }
        err_resp
    });

    log::log_request(
        req_id.and_then(|id| id.to_str().ok().map(str::to_string)),
        req_method,
        uri,
        resp.status(),
        web_error,
        client_status_and_error,
    );

    err_resp.unwrap_or(resp)
}

/// Used by `CatchPanicLayer`: a panic inside a handler becomes an unexpected error.
pub fn panic_to_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    Error::Unexpected(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
