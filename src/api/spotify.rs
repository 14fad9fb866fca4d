use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};

use crate::{
    SpotifyError,
    envelope::Reply,
    proxy::SpotifyProxy,
    types::{MutationRequest, ReadQuery},
};

pub async fn read(
    State(proxy): State<SpotifyProxy>,
    query: Result<Query<ReadQuery>, QueryRejection>,
) -> Reply {
    match query {
        Ok(Query(query)) => proxy.handle_read(&query).await,
        Err(rejection) => Reply::from(SpotifyError::Validation(format!(
            "Invalid query string: {}",
            rejection.body_text()
        ))),
    }
}

pub async fn mutate(
    State(proxy): State<SpotifyProxy>,
    body: Result<Json<MutationRequest>, JsonRejection>,
) -> Reply {
    match body {
        Ok(Json(body)) => proxy.handle_mutation(&body).await,
        Err(rejection) => Reply::from(SpotifyError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        ))),
    }
}
