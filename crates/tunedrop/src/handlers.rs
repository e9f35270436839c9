use actix_web::dev::ServiceResponse;
use actix_web::error::{InternalError, JsonPayloadError, UrlencodedError};
use actix_web::guard::{self, GuardContext};
use actix_web::http::header::{CONTENT_LENGTH, CONTENT_TYPE, ContentType};
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{Either, HttpRequest, HttpResponse, HttpResponseBuilder, web};
use log::{debug, error};
use serde::Deserialize;
use tunedrop_core::ConversionResult;

use crate::pages;
use crate::state::AppState;

const NOT_FOUND_MESSAGE: &str = "Page not found. Please try the converter on the home page.";
const BAD_REQUEST_MESSAGE: &str = "Could not read the submitted form. Please try again.";
const SERVER_ERROR_MESSAGE: &str = "Something went wrong! Please try again later.";

#[derive(Debug, Deserialize)]
pub struct ConvertForm {
    #[serde(rename = "videoID")]
    pub video_id: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/", web::get().to(index))
        .service(
            web::resource("/convert-mp3")
                .route(web::post().guard(guard::fn_guard(has_body)).to(convert_mp3))
                .route(web::post().to(convert_without_body)),
        )
        .route("/ping", web::get().to(ping))
        .route("/env-check", web::get().to(env_check));
}

pub async fn index() -> HttpResponse {
    html(HttpResponse::Ok(), pages::index_page(None))
}

pub async fn convert_mp3(
    body: Either<web::Form<ConvertForm>, web::Json<ConvertForm>>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let form = match body {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => json.into_inner(),
    };

    render_conversion(&state, form.video_id.as_deref()).await
}

/// A POST without a typed body is treated as a form with no `videoID`.
pub async fn convert_without_body(state: web::Data<AppState>) -> HttpResponse {
    render_conversion(&state, None).await
}

async fn render_conversion(state: &AppState, reference: Option<&str>) -> HttpResponse {
    let result = state
        .converter
        .convert(reference, state.settings.credentials.as_ref())
        .await;
    html(HttpResponse::Ok(), pages::index_page(Some(&result)))
}

fn has_body(ctx: &GuardContext<'_>) -> bool {
    let headers = ctx.head().headers();
    let empty = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim() == "0");
    headers.contains_key(CONTENT_TYPE) && !empty
}

pub async fn ping() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("pong")
}

pub async fn env_check(state: web::Data<AppState>) -> HttpResponse {
    let settings = &state.settings;
    HttpResponse::Ok().json(serde_json::json!({
        "apiKeySet": settings.api_key_set,
        "apiHostSet": settings.api_host_set,
        "nodeEnv": settings.environment.as_deref().unwrap_or("not set"),
    }))
}

pub async fn not_found() -> HttpResponse {
    let result = ConversionResult::failure(NOT_FOUND_MESSAGE);
    html(HttpResponse::NotFound(), pages::index_page(Some(&result)))
}

/// Replaces any 5xx response with the generic error page. The underlying
/// error is only shown in development.
pub fn server_error<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    let details = res.response().error().map(|err| err.to_string());
    let (req, _) = res.into_parts();

    error!(
        "{} {} failed with {status}: {}",
        req.method(),
        req.path(),
        details.as_deref().unwrap_or("no error attached")
    );

    let show_details = req
        .app_data::<web::Data<AppState>>()
        .is_some_and(|state| state.settings.is_development());
    let page = pages::error_page(
        SERVER_ERROR_MESSAGE,
        details.as_deref().filter(|_| show_details),
    );
    let response = html(HttpResponse::build(status), page);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err)
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    bad_request(err)
}

fn bad_request<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    debug!("rejected request body: {err}");
    let response = html(
        HttpResponse::BadRequest(),
        pages::error_page(BAD_REQUEST_MESSAGE, None),
    );
    InternalError::from_response(err, response).into()
}

fn html(mut builder: HttpResponseBuilder, page: String) -> HttpResponse {
    builder.content_type(ContentType::html()).body(page)
}
