//! `fetch`-backed transport for the core API client.

use async_trait::async_trait;
use stockdesk::ClientError;
use stockdesk::error::ClientResult;
use stockdesk::request::{FilePart, HttpClient, HttpRequest, HttpResponse, RequestBody};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

fn js_error(context: &str) -> impl Fn(JsValue) -> ClientError + '_ {
    move |e| ClientError::network(format!("{}: {:?}", context, e))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    pub fn new() -> Self {
        Self
    }
}

/// Wraps a file in `FormData`; the browser writes the multipart boundary.
fn form_data(part: &FilePart) -> ClientResult<FormData> {
    let bytes = js_sys::Uint8Array::from(part.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);

    let bag = BlobPropertyBag::new();
    bag.set_type(&part.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)
        .map_err(js_error("building blob"))?;

    let form = FormData::new().map_err(js_error("creating form data"))?;
    form.append_with_blob_and_filename(&part.field, &blob, &part.file_name)
        .map_err(js_error("appending file"))?;
    Ok(form)
}

#[async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let headers = Headers::new().map_err(js_error("creating headers"))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(js_error("setting header"))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            Some(RequestBody::Json(body)) => opts.set_body(&JsValue::from_str(body)),
            Some(RequestBody::Multipart(part)) => opts.set_body(&form_data(part)?.into()),
            None => {}
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(js_error("building request"))?;

        let window = web_sys::window().ok_or_else(|| ClientError::network("no window"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error("fetch"))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(js_error("unexpected fetch result"))?;

        let status = response.status();
        let buffer = JsFuture::from(response.array_buffer().map_err(js_error("reading body"))?)
            .await
            .map_err(js_error("reading body"))?;
        let body = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(HttpResponse { status, body })
    }
}
