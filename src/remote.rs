//! Remote inspection: turns `git remote -v` output into endpoints and picks
//! the remotes hosted on the image-hosting provider.

use std::collections::BTreeMap;

use tracing::debug;

use crate::contract::Prompter;
use crate::error::{ClgError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKind {
    Fetch,
    Push,
}

/// One line of `git remote -v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    pub name: String,
    pub url: String,
    pub host: String,
    pub kind: RemoteKind,
}

/// Host part of a remote URL.
///
/// Handles `scheme://[user@]host[:port]/path` and scp-like `[user@]host:path`.
/// Local paths have no host.
pub fn url_host(url: &str) -> Option<&str> {
    let authority = if let Some((_, rest)) = url.split_once("://") {
        let authority = rest.split('/').next().unwrap_or("");
        let authority = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
        authority.split(':').next().unwrap_or("")
    } else {
        let (before_colon, _) = url.split_once(':')?;
        if before_colon.contains('/') {
            return None;
        }
        before_colon.rsplit_once('@').map_or(before_colon, |(_, h)| h)
    };

    if authority.is_empty() {
        None
    } else {
        Some(authority)
    }
}

/// Parses `<name> <url> (<fetch|push>)`. Anything else yields `None`.
pub fn parse_remote_line(line: &str) -> Option<RemoteEndpoint> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    let url = parts.next()?;
    let kind = match parts.next()? {
        "(fetch)" => RemoteKind::Fetch,
        "(push)" => RemoteKind::Push,
        _ => return None,
    };
    let host = url_host(url)?;

    Some(RemoteEndpoint {
        name: name.to_string(),
        url: url.to_string(),
        host: host.to_string(),
        kind,
    })
}

/// Every parsable endpoint in a `git remote -v` listing.
pub fn parse_remotes(listing: &str) -> Vec<RemoteEndpoint> {
    listing
        .lines()
        .filter_map(|line| {
            let parsed = parse_remote_line(line);
            if parsed.is_none() && !line.trim().is_empty() {
                debug!(line, "Skipping unrecognised remote line");
            }
            parsed
        })
        .collect()
}

/// Remote name to URL, restricted to remotes whose host equals `host`.
pub fn qualifying_remotes(listing: &str, host: &str) -> BTreeMap<String, String> {
    let mut remotes = BTreeMap::new();
    for endpoint in parse_remotes(listing) {
        if endpoint.host != host {
            continue;
        }
        // Fetch comes first in git's output; keep it when push differs.
        remotes.entry(endpoint.name).or_insert(endpoint.url);
    }
    remotes
}

/// Picks the remote to push to.
///
/// `None` when nothing qualifies, the only candidate when there is one, and
/// the operator's choice otherwise. A choice outside the list is an error.
pub fn select_remote<P: Prompter + ?Sized>(
    remotes: &BTreeMap<String, String>,
    prompter: &P,
) -> Result<Option<String>> {
    let names: Vec<String> = remotes.keys().cloned().collect();
    match names.len() {
        0 => Ok(None),
        1 => Ok(names.into_iter().next()),
        _ => {
            let idx = prompter.select("Choose a remote to push your commit:", &names)?;
            match names.get(idx) {
                Some(name) => Ok(Some(name.clone())),
                None => Err(ClgError::InvalidSelection {
                    index: idx,
                    choices: names.len(),
                }),
            }
        }
    }
}
