use crate::{
    Result,
    spotify::SpotifyClient,
    types::{Credential, UserProfile},
};

impl SpotifyClient {
    /// Retrieves the profile of the user the token belongs to.
    pub async fn current_user(&self, token: &Credential) -> Result<UserProfile> {
        self.send_json(self.get(token, "me"), "get current user")
            .await
    }
}
