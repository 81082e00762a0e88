use std::io;
use std::sync::mpsc::{self, Sender};
use std::thread;

use super::{BridgeEnvelope, BridgeError, BridgePort, BridgeReply, BridgeRequest, DialogProvider, RequestId};
use super::host::BridgeHost;

/// UI-side handle to the bridge worker. Sending never blocks.
pub struct BridgeClient {
    tx: Sender<BridgeEnvelope>,
    next_id: u64,
}

impl BridgePort for BridgeClient {
    fn request(&mut self, request: BridgeRequest) -> Result<RequestId, BridgeError> {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.tx
            .send(BridgeEnvelope { id, request })
            .map_err(|_| BridgeError::Disconnected)?;
        Ok(id)
    }
}

/// Start the worker thread that serves bridge requests one at a time.
///
/// Every reply is handed to `sink`, which in the app forwards it into the
/// FLTK channel. The worker exits once the last `BridgeClient` is dropped.
pub fn spawn_bridge<D, F>(host: BridgeHost<D>, sink: F) -> io::Result<BridgeClient>
where
    D: DialogProvider + Send + 'static,
    F: Fn(BridgeReply) + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<BridgeEnvelope>();

    thread::Builder::new()
        .name("native-bridge".to_string())
        .spawn(move || {
            for BridgeEnvelope { id, request } in rx {
                log::debug!("bridge request {:?}", id);
                let result = host.handle(request);
                if let Err(ref e) = result {
                    log::warn!("bridge request {:?} failed: {}", id, e);
                }
                sink(BridgeReply { id, result });
            }
            log::debug!("bridge worker stopped");
        })?;

    Ok(BridgeClient { tx, next_id: 1 })
}
