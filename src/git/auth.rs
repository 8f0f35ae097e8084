//! Remote callbacks and fetch options
//!
//! Authentication is delegated entirely to git's native credential system:
//! - SSH agent, then keys from ~/.ssh/
//! - Git credential helpers
//! - Anonymous access for public HTTPS remotes

use git2::{Cred, CredentialType, Error, ErrorClass, ErrorCode, FetchOptions, RemoteCallbacks};

fn auth_error(message: &str) -> Error {
    Error::new(ErrorCode::Auth, ErrorClass::Http, message)
}

fn ssh_key_credentials(username: &str) -> std::result::Result<Cred, Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    ["id_ed25519", "id_rsa", "id_ecdsa"]
        .iter()
        .map(|name| (ssh_dir.join(name), ssh_dir.join(format!("{name}.pub"))))
        .filter(|(private_key, _)| private_key.exists())
        .find_map(|(private_key, public_key)| {
            let public_key = public_key.exists().then_some(public_key.as_path());
            Cred::ssh_key(username, public_key, &private_key, None).ok()
        })
        .ok_or_else(|| auth_error("no usable SSH key found"))
}

fn user_pass_credentials(
    url: &str,
    username_from_url: Option<&str>,
) -> std::result::Result<Cred, Error> {
    if let Ok(config) = git2::Config::open_default() {
        if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
            return Ok(cred);
        }
    }

    // Public repositories accept any credentials; let the server decide.
    Cred::userpass_plaintext(username_from_url.unwrap_or(""), "")
}

/// Remote callbacks wired to git's native credential system
pub fn remote_callbacks() -> RemoteCallbacks<'static> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            let username = username_from_url.unwrap_or("git");
            return Cred::ssh_key_from_agent(username).or_else(|_| ssh_key_credentials(username));
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            return user_pass_credentials(url, username_from_url);
        }

        Err(auth_error("authentication failed"))
    });
    callbacks
}

/// Fetch options for clone and fetch; `depth` of `None` fetches full history
pub fn fetch_options(depth: Option<i32>) -> FetchOptions<'static> {
    let mut options = FetchOptions::new();
    options.remote_callbacks(remote_callbacks());
    if let Some(depth) = depth {
        options.depth(depth);
    }
    options
}
