//! Request classification: converts (method, URL shape) into a `HandlerKind`.

use http::Method;
use resrouter_core::url::{RelKind, UrlDescriptor};

// ---------------------------------------------------------------------------
// HandlerKind
// ---------------------------------------------------------------------------

/// The eight operation kinds a resource API request can classify as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// `GET /articles`
    GetCollection,
    /// `GET /articles/1`
    GetResource,
    /// `GET /articles/1/author`
    GetRelated,
    /// `GET /articles/1/relationships/author`
    GetRelationships,
    /// `POST /articles`
    CreateResource,
    /// `PATCH /articles/1`
    UpdateResource,
    /// `PATCH /articles/1/relationships/author`
    UpdateRelationships,
    /// `DELETE /articles/1`
    DeleteResource,
}

impl HandlerKind {
    /// Whether handlers of this kind are keyed by a relationship name in
    /// addition to the owning resource type.
    #[must_use]
    pub fn is_relationship_scoped(self) -> bool {
        matches!(
            self,
            Self::GetRelated | Self::GetRelationships | Self::UpdateRelationships
        )
    }
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Classify a request into a `HandlerKind`.
///
/// Total and side-effect free: every (method, shape) pair either maps to
/// exactly one kind or fails explicitly. There is no default kind.
///
/// # Errors
///
/// - `ClassifyError::MethodNotSupported` for methods outside
///   GET/POST/PATCH/DELETE.
/// - `ClassifyError::UnrecognizedUrl` when the method is supported but the
///   URL shape matches no operation.
pub fn classify(method: &Method, url: &UrlDescriptor) -> Result<HandlerKind, ClassifyError> {
    let kind = match *method {
        Method::GET => match url.rel_kind {
            RelKind::Related if url.res_id.is_some() => Some(HandlerKind::GetRelated),
            RelKind::SelfLink if url.res_id.is_some() => Some(HandlerKind::GetRelationships),
            RelKind::None if !url.is_collection && url.res_id.is_some() => {
                Some(HandlerKind::GetResource)
            }
            RelKind::None if url.is_collection => Some(HandlerKind::GetCollection),
            _ => None,
        },
        Method::PATCH => match url.rel_kind {
            RelKind::Related | RelKind::SelfLink if url.res_id.is_some() => {
                Some(HandlerKind::UpdateRelationships)
            }
            RelKind::None if !url.is_collection && url.res_id.is_some() => {
                Some(HandlerKind::UpdateResource)
            }
            _ => None,
        },
        Method::DELETE => {
            if url.rel_kind == RelKind::None && !url.is_collection && url.res_id.is_some() {
                Some(HandlerKind::DeleteResource)
            } else {
                None
            }
        }
        Method::POST => {
            if url.rel_kind == RelKind::None && url.is_collection {
                Some(HandlerKind::CreateResource)
            } else {
                None
            }
        }
        _ => {
            return Err(ClassifyError::MethodNotSupported {
                method: method.to_string(),
            })
        }
    };
    kind.ok_or_else(|| ClassifyError::UnrecognizedUrl {
        method: method.to_string(),
        res_type: url.res_type.clone(),
    })
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from classifying a request.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("URL shape not recognized for {method} on {res_type}")]
    UnrecognizedUrl { method: String, res_type: String },
    #[error("method not supported: {method}")]
    MethodNotSupported { method: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use resrouter_core::url::RelKind;

    use super::*;

    #[test]
    fn documented_pairs_classify_to_their_kind() {
        let cases = [
            (
                Method::GET,
                UrlDescriptor::collection("articles"),
                HandlerKind::GetCollection,
            ),
            (
                Method::GET,
                UrlDescriptor::resource("articles", "1"),
                HandlerKind::GetResource,
            ),
            (
                Method::GET,
                UrlDescriptor::relationship("articles", "1", RelKind::Related, "author"),
                HandlerKind::GetRelated,
            ),
            (
                Method::GET,
                UrlDescriptor::relationship("articles", "1", RelKind::Related, "tags"),
                HandlerKind::GetRelated,
            ),
            (
                Method::GET,
                UrlDescriptor::relationship("articles", "1", RelKind::SelfLink, "tags"),
                HandlerKind::GetRelationships,
            ),
            (
                Method::GET,
                UrlDescriptor::relationship("tags", "1", RelKind::SelfLink, "articles"),
                HandlerKind::GetRelationships,
            ),
            (
                Method::POST,
                UrlDescriptor::collection("articles"),
                HandlerKind::CreateResource,
            ),
            (
                Method::PATCH,
                UrlDescriptor::resource("articles", "1"),
                HandlerKind::UpdateResource,
            ),
            (
                Method::PATCH,
                UrlDescriptor::relationship("articles", "1", RelKind::SelfLink, "author"),
                HandlerKind::UpdateRelationships,
            ),
            (
                Method::DELETE,
                UrlDescriptor::resource("articles", "1"),
                HandlerKind::DeleteResource,
            ),
        ];
        for (method, url, expected) in cases {
            assert_eq!(
                classify(&method, &url).unwrap(),
                expected,
                "{method} {url:?}"
            );
        }
    }

    #[test]
    fn unsupported_method_fails() {
        let url = UrlDescriptor::collection("articles");
        let err = classify(&Method::PUT, &url).unwrap_err();
        assert!(matches!(err, ClassifyError::MethodNotSupported { method } if method == "PUT"));
    }

    #[test]
    fn get_without_id_or_collection_fails() {
        let url = UrlDescriptor {
            res_type: "articles".to_string(),
            ..UrlDescriptor::default()
        };
        let err = classify(&Method::GET, &url).unwrap_err();
        assert!(matches!(err, ClassifyError::UnrecognizedUrl { .. }));
    }

    #[test]
    fn post_to_single_resource_fails() {
        let url = UrlDescriptor::resource("articles", "1");
        let err = classify(&Method::POST, &url).unwrap_err();
        assert!(matches!(err, ClassifyError::UnrecognizedUrl { .. }));
    }

    #[test]
    fn delete_on_collection_fails() {
        let url = UrlDescriptor::collection("articles");
        let err = classify(&Method::DELETE, &url).unwrap_err();
        assert!(matches!(err, ClassifyError::UnrecognizedUrl { .. }));
    }

    #[test]
    fn patch_without_id_fails() {
        let url = UrlDescriptor::collection("articles");
        let err = classify(&Method::PATCH, &url).unwrap_err();
        assert!(matches!(err, ClassifyError::UnrecognizedUrl { .. }));
    }

    #[test]
    fn related_url_without_id_fails() {
        let url = UrlDescriptor {
            res_type: "articles".to_string(),
            rel_kind: RelKind::Related,
            rel_name: Some("author".to_string()),
            ..UrlDescriptor::default()
        };
        let err = classify(&Method::GET, &url).unwrap_err();
        assert!(matches!(err, ClassifyError::UnrecognizedUrl { .. }));
    }

    #[test]
    fn relationship_scoped_kinds() {
        assert!(HandlerKind::GetRelated.is_relationship_scoped());
        assert!(HandlerKind::GetRelationships.is_relationship_scoped());
        assert!(HandlerKind::UpdateRelationships.is_relationship_scoped());
        assert!(!HandlerKind::GetResource.is_relationship_scoped());
        assert!(!HandlerKind::CreateResource.is_relationship_scoped());
    }
}
