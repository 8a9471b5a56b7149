//! Editing session context handed to the resolver

use serde::{Deserialize, Serialize};

/// An editing session as known to the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Option<u64>,
    pub token: Option<String>,
    pub document_id: Option<u64>,
}

/// The acting user. Absent in public share contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
}

impl User {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// Everything the resolver needs to know about where it runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverContext {
    pub session: Option<Session>,
    pub user: Option<User>,
    pub share_token: Option<String>,
    /// Directory of the edited document, used for relative references.
    pub current_directory: String,
    /// Explicit document id; overrides the session's for lookups.
    pub file_id: Option<u64>,
}

impl ResolverContext {
    pub fn new(current_directory: impl Into<String>) -> Self {
        Self {
            current_directory: current_directory.into(),
            ..Default::default()
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_share_token(mut self, token: impl Into<String>) -> Self {
        self.share_token = Some(token.into());
        self
    }

    pub fn with_file_id(mut self, file_id: u64) -> Self {
        self.file_id = Some(file_id);
        self
    }

    /// The document this resolver works on: the explicit file id, else the
    /// session's document.
    pub fn document_id(&self) -> Option<u64> {
        self.file_id
            .or_else(|| self.session.as_ref().and_then(|s| s.document_id))
    }

    /// Body for the attachment listing request.
    ///
    /// The session's own document id wins over the explicit file id here;
    /// the listing endpoint validates the session against that document.
    pub fn attachment_list_request(&self) -> AttachmentListRequest {
        let session = self.session.as_ref();
        AttachmentListRequest {
            document_id: session
                .and_then(|s| s.document_id)
                .or_else(|| self.document_id()),
            session_id: session.and_then(|s| s.id),
            session_token: session.and_then(|s| s.token.clone()),
            share_token: self.share_token.clone(),
        }
    }
}

/// JSON body posted to the attachment listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentListRequest {
    pub document_id: Option<u64>,
    pub session_id: Option<u64>,
    pub session_token: Option<String>,
    pub share_token: Option<String>,
}
