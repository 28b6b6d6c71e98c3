use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde_json::json;

use passgate_auth::{
    CreateUserRequest, DirectoryError, DirectoryResponse, UserDirectory, ValidateCredentialsRequest,
};
use passgate_core::{Identity, UserId};

#[derive(Debug, Clone)]
struct StoredUser {
    identity: Identity,
    password: String,
}

/// In-memory user directory honouring the HTTP directory's status contract.
///
/// Intended for tests/dev. Passwords are kept in plain text.
#[derive(Debug)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, StoredUser>>,
    next_id: AtomicI64,
    approval_roles: HashSet<String>,
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            approval_roles: HashSet::new(),
        }
    }
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// New accounts with any of these roles start out pending approval.
    pub fn requiring_approval<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            approval_roles: roles.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Clear the pending flag of a user. Returns `false` if the user is unknown.
    pub fn approve(&self, username: &str) -> bool {
        let Ok(mut users) = self.users.write() else {
            return false;
        };
        match users.get_mut(username) {
            Some(user) => {
                user.identity.pending_approval = false;
                user.identity.updated_at = Some(Utc::now().naive_utc());
                true
            }
            None => false,
        }
    }

    fn respond_json(status: u16, status_line: &str, body: String) -> DirectoryResponse {
        DirectoryResponse::new(status, status_line, Some(body))
    }

    fn identity_body(identity: &Identity) -> Result<String, DirectoryError> {
        serde_json::to_string(identity)
            .map_err(|e| DirectoryError::Transport(format!("failed to encode user: {e}")))
    }
}

fn lock_poisoned() -> DirectoryError {
    DirectoryError::Transport("lock poisoned".to_string())
}

#[async_trait::async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<DirectoryResponse, DirectoryError> {
        let mut users = self.users.write().map_err(|_| lock_poisoned())?;

        let duplicate = users.contains_key(&request.username)
            || users
                .values()
                .any(|u| u.identity.email.eq_ignore_ascii_case(&request.email));
        if duplicate {
            return Ok(Self::respond_json(
                409,
                "409 Conflict",
                json!({ "message": "Username or email already exists" }).to_string(),
            ));
        }

        let now = Utc::now().naive_utc();
        let identity = Identity {
            id: UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst)),
            username: request.username.clone(),
            email: request.email.clone(),
            role: request.role.clone(),
            restricted: false,
            restriction_reason: None,
            pending_approval: self.approval_roles.contains(&request.role),
            created_at: Some(now),
            updated_at: Some(now),
        };
        let body = Self::identity_body(&identity)?;

        users.insert(
            request.username.clone(),
            StoredUser {
                identity,
                password: request.password.clone(),
            },
        );

        Ok(Self::respond_json(201, "201 Created", body))
    }

    async fn validate_credentials(
        &self,
        request: &ValidateCredentialsRequest,
    ) -> Result<DirectoryResponse, DirectoryError> {
        let users = self.users.read().map_err(|_| lock_poisoned())?;

        match users.get(&request.username) {
            Some(user) if user.password == request.password => Ok(Self::respond_json(
                200,
                "200 OK",
                Self::identity_body(&user.identity)?,
            )),
            _ => Ok(Self::respond_json(
                401,
                "401 Unauthorized",
                json!({ "message": "Invalid username or password" }).to_string(),
            )),
        }
    }
}
