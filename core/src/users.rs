//! Read-only user profile viewer.

use tracing::warn;

use crate::api::Api;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::User;

pub struct UserProfile<T> {
    api: Api<T>,
    selected: Option<User>,
    visible: bool,
    loading: bool,
}

impl<T: Transport> UserProfile<T> {
    pub fn new(api: Api<T>) -> Self {
        Self {
            api,
            selected: None,
            visible: false,
            loading: false,
        }
    }

    pub fn selected(&self) -> Option<&User> {
        self.selected.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch the full profile and show it. On failure the modal stays closed.
    pub async fn open(&mut self, user_id: u64) -> Result<(), ApiError> {
        self.loading = true;
        let result = self.api.get_user(user_id).await;
        self.loading = false;

        match result {
            Ok(user) => {
                self.selected = Some(user);
                self.visible = true;
                Ok(())
            }
            Err(err) => {
                warn!(user_id, error = %err, "failed to load user");
                Err(err)
            }
        }
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.selected = None;
    }
}
