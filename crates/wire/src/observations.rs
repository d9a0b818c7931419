// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `/workspaces/{id}/observations*` request/response bodies.

use relay_core::{Observation, ObservationId, ObservationType};
use serde::{Deserialize, Serialize};

/// `POST /workspaces/{id}/observations`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateObservationRequest {
    #[serde(rename = "type")]
    pub kind: ObservationType,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub concepts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservationResponse {
    pub observation: Observation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservationsResponse {
    pub observations: Vec<Observation>,
}

/// `GET /workspaces/{id}/observations/search?query=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// One type-grouped slice of `GET .../observations/compact`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DigestGroupBody {
    #[serde(rename = "type")]
    pub kind: ObservationType,
    pub observations: Vec<Observation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompactDigestResponse {
    pub digest: Vec<DigestGroupBody>,
}

/// `POST /workspaces/{id}/observations/batch`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchObservationsRequest {
    pub ids: Vec<ObservationId>,
}

#[cfg(test)]
#[path = "observations_tests.rs"]
mod tests;
