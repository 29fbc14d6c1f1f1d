use contracts::system::auth::UserInfo;
use web_sys::window;

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Persist the session after a successful login
pub fn save_session(token: &str, user: &UserInfo) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
        match serde_json::to_string(user) {
            Ok(json) => {
                let _ = storage.set_item(USER_KEY, &json);
            }
            Err(e) => log::error!("failed to serialize user: {}", e),
        }
    }
}

/// Restore the session; a stored user that no longer parses is discarded
pub fn load_session() -> Option<(String, UserInfo)> {
    let storage = get_local_storage()?;
    let token = storage.get_item(TOKEN_KEY).ok()??;
    let user_json = storage.get_item(USER_KEY).ok()??;
    match serde_json::from_str::<UserInfo>(&user_json) {
        Ok(user) => Some((token, user)),
        Err(e) => {
            log::warn!("stored session is unreadable, clearing it: {}", e);
            clear_session();
            None
        }
    }
}

/// Forget token and user
pub fn clear_session() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}
