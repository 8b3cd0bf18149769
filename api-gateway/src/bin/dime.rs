//! DIME planner Lambda - Handles the POST /api/dime endpoint.
//!
//! Validates a financial profile, computes the DIME life-insurance need, asks
//! Gemini for plain-language advice and returns both as JSON.

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use shared::http::{error_response, json_response};
use shared::{
    build_prompt, extract_candidate, get_gemini_api_key, normalize_body, parse_advice,
    verify_api_key, AdviceGenerator, Config, DimeResponse, DimeResult, GeminiClient,
    GenerationParams, UserData,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    config: Config,
    generator: Option<Arc<dyn AdviceGenerator>>,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let mut config = Config::from_env();

        if config.needs_secret_lookup() {
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let secrets_client = aws_sdk_secretsmanager::Client::new(&aws_config);
            let secret_arn = config.gemini_api_key_secret_arn.clone().unwrap_or_default();

            match get_gemini_api_key(&secrets_client, &secret_arn).await {
                Ok(key) => config.gemini_api_key = Some(key),
                Err(e) => error!("Failed to load Gemini API key from Secrets Manager: {}", e),
            }
        }

        if config.api_key.is_none() {
            warn!("PC_API_KEY not set; x-api-key check disabled");
        }

        let generator = match GeminiClient::from_config(reqwest::Client::new(), &config) {
            Some(client) => {
                info!(model = %client.model(), "DIME planner initialised");
                Some(Arc::new(client) as Arc<dyn AdviceGenerator>)
            }
            None => {
                warn!("GEMINI_API_KEY not set; requests will fail until it is configured");
                None
            }
        };

        Ok(Self { config, generator })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let request_id = event
        .lambda_context_ref()
        .map(|ctx| ctx.request_id.clone())
        .unwrap_or_default();

    match plan(&state, &event).await {
        Ok(response) => {
            info!(request_id = %request_id, status = 200, "DIME plan generated");
            json_response(200, &response)
        }
        Err(e) => {
            match &e {
                shared::Error::Validation(detail) => {
                    warn!(request_id = %request_id, "Invalid payload: {}", detail)
                }
                shared::Error::MethodNotAllowed | shared::Error::Unauthorized => {
                    warn!(request_id = %request_id, method = %event.method(), "Request rejected: {}", e)
                }
                _ => error!(request_id = %request_id, "DIME request failed: {}", e),
            }
            error_response(&e)
        }
    }
}

/// Run the request through every gate, the calculation and the model call.
async fn plan(state: &AppState, event: &Request) -> shared::Result<DimeResponse> {
    if event.method() != Method::POST {
        return Err(shared::Error::MethodNotAllowed);
    }

    verify_api_key(state.config.api_key.as_deref(), event.headers())?;

    let generator = state
        .generator
        .as_deref()
        .ok_or_else(|| shared::Error::Config("Missing GEMINI_API_KEY".to_string()))?;

    let body = normalize_body(event.body().as_ref());
    let user_data = UserData::from_candidate(extract_candidate(body))?;

    let results = DimeResult::compute(&user_data);
    let prompt = build_prompt(&user_data, &results);

    let raw = generator
        .generate(&prompt, &GenerationParams::for_advice())
        .await?;
    let advice_json = parse_advice(&raw)?;
    let advice = advice_json.render();

    Ok(DimeResponse {
        user_data,
        results,
        advice_json,
        advice,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}
