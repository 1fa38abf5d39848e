// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for dispatch outcomes.

use core::fmt;

use penumbra_dom::SelectorError;

use crate::registry::InitError;

/// What a request searched for, named in failure outcomes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchTarget {
    /// Search by element identifier.
    Id(String),
    /// Search by selector, first match in traversal order.
    Selector(String),
}

impl fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id:?}"),
            Self::Selector(text) => write!(f, "selector {text:?}"),
        }
    }
}

/// Failure reason a request settles with.
///
/// Every variant is a settled outcome of one request; none of them propagate
/// beyond the returned `Result` or disturb other in-flight requests.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The request supplied neither an element id nor a selector.
    #[error("initialization request supplies neither an element id nor a selector")]
    MissingTarget,
    /// The request supplied neither a component type nor a custom initializer.
    #[error("initialization request supplies neither a component type nor a custom initializer")]
    MissingHandler,
    /// The request's selector failed to parse.
    #[error("selector {selector:?} failed to parse")]
    InvalidSelector {
        /// The selector text as supplied.
        selector: String,
        /// The parse failure.
        #[source]
        source: SelectorError,
    },
    /// The locate step found nothing for the searched key.
    #[error("no element found for {0}")]
    NotFound(SearchTarget),
    /// Neither the registry nor the fallback provider knew the component type.
    #[error("no initializer registered or built in for component type {0:?}")]
    UnknownComponentType(String),
    /// The resolved initializer returned an error; re-surfaced, not swallowed.
    #[error("initializer failed for {target}: {reason}")]
    HandlerFailed {
        /// The target whose initializer ran.
        target: SearchTarget,
        /// The initializer's own error.
        reason: InitError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_target_display() {
        assert_eq!(SearchTarget::Id("go".into()).to_string(), "id \"go\"");
        assert_eq!(
            SearchTarget::Selector(".act".into()).to_string(),
            "selector \".act\""
        );
    }

    #[test]
    fn messages_name_the_search_key() {
        let err = DispatchError::NotFound(SearchTarget::Id("missing".into()));
        assert!(err.to_string().contains("\"missing\""));

        let err = DispatchError::HandlerFailed {
            target: SearchTarget::Selector("x-a".into()),
            reason: "boom".into(),
        };
        let text = err.to_string();
        assert!(text.contains("\"x-a\"") && text.contains("boom"));
    }
}
