use serde::Serialize;
use std::sync::Arc;
use warp::Filter;
use warp::http::StatusCode;

use hangman_types::{
    AddTermsRequest, CreateRoundRequest, EndRoundRequest, ErrorResponse, GuessRequest,
    RandomRoundRequest, RemoveTermsRequest, ValidationFailure,
};

use crate::hangman_service::HangmanService;

pub mod audit;
pub mod config;
pub mod hangman_service;

pub fn create_routes(
    service: Arc<HangmanService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let service_filter = warp::any().map(move || service.clone());

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // Current round for a room
    let get_round = warp::path!("rooms" / String / "hangman")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_get_round);

    let create_round = warp::path!("rooms" / String / "hangman")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_create_round);

    let random_round = warp::path!("rooms" / String / "hangman" / "random")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_random_round);

    let guess = warp::path!("rooms" / String / "hangman" / "guess")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_guess);

    let end_round = warp::path!("rooms" / String / "hangman" / "end")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_end_round);

    let disable = warp::path!("rooms" / String / "hangman" / "disable")
        .and(warp::post())
        .and(service_filter.clone())
        .and_then(|room_id: String, service: Arc<HangmanService>| {
            handle_set_enabled(room_id, false, service)
        });

    let enable = warp::path!("rooms" / String / "hangman" / "enable")
        .and(warp::post())
        .and(service_filter.clone())
        .and_then(|room_id: String, service: Arc<HangmanService>| {
            handle_set_enabled(room_id, true, service)
        });

    // Saved phrases for random rounds
    let get_terms = warp::path!("rooms" / String / "terms")
        .and(warp::get())
        .and(service_filter.clone())
        .and_then(handle_get_terms);

    let add_terms = warp::path!("rooms" / String / "terms")
        .and(warp::post())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_add_terms);

    let remove_terms = warp::path!("rooms" / String / "terms")
        .and(warp::delete())
        .and(warp::body::json())
        .and(service_filter.clone())
        .and_then(handle_remove_terms);

    health
        .or(get_round)
        .or(create_round)
        .or(random_round)
        .or(guess)
        .or(end_round)
        .or(disable)
        .or(enable)
        .or(get_terms)
        .or(add_terms)
        .or(remove_terms)
        .with(warp::log("hangman"))
}

fn failure_status(failure: &ValidationFailure) -> StatusCode {
    if failure.is_not_found() {
        StatusCode::NOT_FOUND
    } else if failure.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::BAD_REQUEST
    }
}

fn reply_with<T: Serialize>(
    result: Result<T, ValidationFailure>,
    success: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(value) => warp::reply::with_status(warp::reply::json(&value), success),
        Err(failure) => {
            let status = failure_status(&failure);
            tracing::debug!("Rejected hangman request: {}", failure);
            warp::reply::with_status(
                warp::reply::json(&ErrorResponse::from(failure)),
                status,
            )
        }
    }
}

async fn handle_get_round(
    room_id: String,
    service: Arc<HangmanService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service.snapshot(&room_id).await;
    Ok(reply_with(result, StatusCode::OK))
}

async fn handle_create_round(
    room_id: String,
    request: CreateRoundRequest,
    service: Arc<HangmanService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service.create_round(&room_id, request).await;
    Ok(reply_with(result, StatusCode::CREATED))
}

async fn handle_random_round(
    room_id: String,
    request: RandomRoundRequest,
    service: Arc<HangmanService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service
        .create_random_round(&room_id, &request.creator)
        .await;
    Ok(reply_with(result, StatusCode::CREATED))
}

async fn handle_guess(
    room_id: String,
    request: GuessRequest,
    service: Arc<HangmanService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service.guess(&room_id, request).await;
    Ok(reply_with(result, StatusCode::OK))
}

async fn handle_end_round(
    room_id: String,
    request: EndRoundRequest,
    service: Arc<HangmanService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service.end_round(&room_id, &request.actor).await;
    Ok(reply_with(result, StatusCode::OK))
}

async fn handle_set_enabled(
    room_id: String,
    enabled: bool,
    service: Arc<HangmanService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service.set_enabled(&room_id, enabled).await;
    Ok(reply_with(result, StatusCode::OK))
}

async fn handle_get_terms(
    room_id: String,
    service: Arc<HangmanService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service.terms(&room_id).await;
    Ok(reply_with(result, StatusCode::OK))
}

async fn handle_add_terms(
    room_id: String,
    request: AddTermsRequest,
    service: Arc<HangmanService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service.add_terms(&room_id, request).await;
    Ok(reply_with(result, StatusCode::CREATED))
}

async fn handle_remove_terms(
    room_id: String,
    request: RemoveTermsRequest,
    service: Arc<HangmanService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = service.remove_terms(&room_id, request).await;
    Ok(reply_with(result, StatusCode::OK))
}
