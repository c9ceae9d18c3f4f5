//! Repository authentication using credentials carried on a `RepositoryEntry`.
//!
//! Credential interpolation (environment variables, secret stores) happens
//! before a `RepositoryEntry` ever reaches this crate; this module just
//! applies whatever username/password it's handed.

use reqwest::RequestBuilder;

use crate::repository::MavenRepository;

/// Apply authentication to a request if the repository has credentials.
pub fn apply_auth(request: RequestBuilder, repo: &MavenRepository) -> RequestBuilder {
    match (&repo.username, &repo.password) {
        (Some(user), Some(pass)) => request.basic_auth(user, Some(pass)),
        (Some(user), None) => request.basic_auth(user, None::<&str>),
        (None, Some(token)) => request.bearer_auth(token),
        (None, None) => request,
    }
}
