// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Duration;

use crate::auth::Authorizer;
use crate::config::DEFAULT_DEADLINE_SECS;

#[derive(Clone)]
pub struct AppState {
    pub authorizer: Arc<Authorizer>,
    /// Wall-clock limit for one authorization, network calls included.
    pub deadline: Duration,
}

impl AppState {
    pub fn new(authorizer: Authorizer) -> Self {
        Self {
            authorizer: Arc::new(authorizer),
            deadline: Duration::from_secs(DEFAULT_DEADLINE_SECS),
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}
