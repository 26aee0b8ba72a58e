use std::{env, io::Read, process::ExitCode};

use async_graphql::Request;

use quiz_engine::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult, ErrorResponse},
    graphql::create_schema,
    models::domain::Identity,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.rust_log.as_str()),
    )
    .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            match serde_json::to_string(&ErrorResponse::from(&err)) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

/// Executes one GraphQL document read from stdin against a fresh store.
async fn run(config: Config) -> AppResult<()> {
    if let Err(err) = config.validate_for_production() {
        log::warn!("{}", err);
    }

    let state = AppState::new(config).await?;

    if let Ok(fields) = env::var("QUIZ_ISSUE_TOKEN") {
        let identity = parse_identity(&fields)?;
        println!("{}", state.jwt_service.create_token(&identity)?);
        return Ok(());
    }

    let schema = create_schema(state.clone());

    let mut document = String::new();
    std::io::stdin()
        .read_to_string(&mut document)
        .map_err(|e| AppError::InternalError(format!("Failed to read stdin: {}", e)))?;

    if document.trim().is_empty() {
        println!("{}", schema.sdl());
        return Ok(());
    }

    let mut request = Request::new(document);
    match env::var("QUIZ_ACTOR_TOKEN") {
        Ok(token) => {
            let identity = state.jwt_service.identity_from_token(&token)?;
            log::debug!("Acting as {} ({:?})", identity.id, identity.role);
            request = request.data(identity);
        }
        Err(_) => log::debug!("No QUIZ_ACTOR_TOKEN set, executing anonymously"),
    }

    let response = schema.execute(request).await;
    let json = serde_json::to_string_pretty(&response)
        .map_err(|e| AppError::InternalError(format!("Failed to encode response: {}", e)))?;
    println!("{}", json);

    Ok(())
}

/// Parses `id,name,role`.
fn parse_identity(fields: &str) -> AppResult<Identity> {
    let parts: Vec<&str> = fields.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [id, name, role] if !id.is_empty() && !name.is_empty() => {
            Ok(Identity::new(id, name, role.parse()?))
        }
        _ => Err(AppError::ValidationError(
            "QUIZ_ISSUE_TOKEN must look like 'id,name,role'".to_string(),
        )),
    }
}
