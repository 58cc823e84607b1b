// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::FetchLane;
use crate::decode::decode_glb;
use agora_core::asset::{AssetHandle, FetchKey, Model};
use agora_core::event::LoadEvent;
use agora_core::lane::{Lane, LaneKind};
use anyhow::Context;

/// Downloads GLB/glTF assets over HTTP and decodes them off the tick thread.
///
/// Work is spawned onto the provided tokio runtime; the result crosses back
/// to the loader through the event channel. No request timeout is
/// configured: a fetch either completes or never reports.
pub struct RemoteFetchLane {
    client: reqwest::Client,
    runtime: tokio::runtime::Handle,
    events: flume::Sender<LoadEvent>,
}

impl RemoteFetchLane {
    /// Creates a lane that spawns onto `runtime` and reports through `events`.
    pub fn new(runtime: tokio::runtime::Handle, events: flume::Sender<LoadEvent>) -> Self {
        Self {
            client: reqwest::Client::new(),
            runtime,
            events,
        }
    }

    async fn download(client: &reqwest::Client, key: &FetchKey) -> anyhow::Result<Model> {
        let response = client
            .get(key.as_str())
            .send()
            .await
            .with_context(|| format!("request to {key} failed"))?
            .error_for_status()
            .with_context(|| format!("server rejected {key}"))?;
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("failed to read body of {key}"))?;
        let model = decode_glb(&bytes).with_context(|| format!("failed to decode {key}"))?;
        Ok(model)
    }
}

impl Lane for RemoteFetchLane {
    fn strategy_name(&self) -> &'static str {
        "RemoteGlb"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Fetch
    }
}

impl FetchLane for RemoteFetchLane {
    fn fetch(&self, key: FetchKey) {
        let client = self.client.clone();
        let events = self.events.clone();

        self.runtime.spawn(async move {
            let _ = events.send(LoadEvent::LoadStarted { key: key.clone() });

            match Self::download(&client, &key).await {
                Ok(model) => {
                    log::info!(
                        "RemoteFetchLane: resolved {key} ({} nodes, {} skins)",
                        model.node_count,
                        model.skin_count
                    );
                    let _ = events.send(LoadEvent::LoadComplete {
                        key,
                        handle: AssetHandle::new(model),
                    });
                }
                Err(e) => {
                    log::error!("RemoteFetchLane: load failed for {key}: {e:#}");
                    let _ = events.send(LoadEvent::LoadFailed {
                        key,
                        reason: format!("{e:#}"),
                    });
                }
            }
        });
    }
}
