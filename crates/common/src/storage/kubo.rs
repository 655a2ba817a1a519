use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use url::Url;

use super::types::{FileMetadata, Pin, PinStatusReport, UploadFile};
use super::{StorageError, StorageService};
use crate::identifier::Identifier;

/// UnixFS link type for regular files in `ls` output
const UNIXFS_FILE: u8 = 2;

/// Client for the HTTP RPC API of an IPFS (Kubo) node.
///
/// Uploads are wrapped in a directory so a multi-file selection
///  is addressed by a single root, and pinned on the node.
#[derive(Debug, Clone)]
pub struct KuboClient {
    remote: Url,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AddEntry {
    name: String,
    hash: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsResponse {
    #[serde(default)]
    objects: Vec<LsObject>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsObject {
    #[serde(default)]
    links: Vec<LsLink>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LsLink {
    name: String,
    hash: String,
    #[serde(default)]
    size: u64,
    #[serde(rename = "Type")]
    kind: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinLsResponse {
    #[serde(default)]
    keys: HashMap<String, PinLsKey>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PinLsKey {
    #[serde(rename = "Type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RpcError {
    message: String,
}

impl KuboClient {
    pub fn new(remote: &Url) -> Result<Self, StorageError> {
        let client = Client::builder().build()?;
        Ok(Self {
            remote: remote.clone(),
            client,
        })
    }

    /// Get the base URL for RPC requests
    pub fn base_url(&self) -> &Url {
        &self.remote
    }

    fn rpc_url(&self, command: &str, params: &[(&str, &str)]) -> Result<Url, StorageError> {
        let mut url = self.remote.join(&format!("/api/v0/{}", command))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    /// Turn a non-success response into [`StorageError::HttpStatus`],
    ///  preferring the RPC error message over the raw body
    async fn check(response: Response) -> Result<Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await?;
        let message = serde_json::from_str::<RpcError>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(StorageError::HttpStatus(status, message))
    }
}

#[async_trait]
impl StorageService for KuboClient {
    async fn put(&self, files: Vec<UploadFile>) -> Result<Identifier, StorageError> {
        let url = self.rpc_url(
            "add",
            &[
                ("wrap-with-directory", "true"),
                ("pin", "true"),
                ("cid-version", "1"),
                ("progress", "false"),
            ],
        )?;

        let form = files.into_iter().fold(Form::new(), |form, file| {
            form.part("file", Part::bytes(file.data).file_name(file.name))
        });

        let response = self.client.post(url).multipart(form).send().await?;
        let body = Self::check(response).await?.text().await?;

        // one JSON object per added entry; the wrapping directory has an empty name
        let mut root = None;
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let entry: AddEntry = serde_json::from_str(line)?;
            if entry.name.is_empty() {
                root = Some(Identifier::new(&entry.hash)?);
            }
        }
        let root = root.ok_or(StorageError::MissingRoot)?;
        tracing::debug!(identifier = %root, "kubo add complete");
        Ok(root)
    }

    async fn get(&self, id: &Identifier) -> Result<Vec<FileMetadata>, StorageError> {
        let url = self.rpc_url("ls", &[("arg", id.as_str())])?;
        let response = self.client.post(url).send().await?;
        let listing: LsResponse = Self::check(response).await?.json().await?;

        let object = listing
            .objects
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::NotFound(id.clone()))?;

        object
            .links
            .into_iter()
            .filter(|link| link.kind == UNIXFS_FILE)
            .map(|link| {
                Ok(FileMetadata {
                    name: link.name,
                    size: link.size,
                    cid: Identifier::new(&link.hash)?,
                    last_modified: None,
                })
            })
            .collect()
    }

    async fn status(&self, id: &Identifier) -> Result<PinStatusReport, StorageError> {
        let url = self.rpc_url("pin/ls", &[("arg", id.as_str()), ("type", "recursive")])?;
        let response = self.client.post(url).send().await?;

        let listing: PinLsResponse = match Self::check(response).await {
            Ok(response) => response.json().await?,
            Err(StorageError::HttpStatus(_, message)) if message.contains("not pinned") => {
                return Ok(PinStatusReport::default());
            }
            Err(e) => return Err(e),
        };

        let pins = listing
            .keys
            .into_values()
            .map(|key| Pin { kind: key.kind })
            .collect();

        // the node does not track when a root was added
        Ok(PinStatusReport {
            created: None,
            pins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_url() {
        let client = KuboClient::new(&Url::parse("http://127.0.0.1:5001").unwrap()).unwrap();
        let url = client
            .rpc_url("pin/ls", &[("arg", "bafyroot"), ("type", "recursive")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5001/api/v0/pin/ls?arg=bafyroot&type=recursive"
        );
    }

    #[test]
    fn test_ls_response_parsing() {
        let raw = r#"{"Objects":[{"Hash":"bafyroot","Links":[
            {"Name":"a.txt","Hash":"bafya","Size":5,"Type":2,"Target":""},
            {"Name":"dir","Hash":"bafyd","Size":0,"Type":1,"Target":""}
        ]}]}"#;
        let parsed: LsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.objects.len(), 1);
        assert_eq!(parsed.objects[0].links.len(), 2);
        assert_eq!(parsed.objects[0].links[0].kind, UNIXFS_FILE);
    }
}
