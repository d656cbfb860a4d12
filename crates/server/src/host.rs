//! 基于行分隔 JSON 的本地宿主循环。
//!
//! 每行一个 `MethodCall`，每个调用在阻塞线程池上独立执行，
//! 应答按完成顺序逐行写回，由请求 `id` 关联。

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::Context;
use disk_inventory_api_types::{ErrorResponse, MethodCall, MethodReply};
use system_capabilities::{InventoryService, SystemProbe};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// 持续读取请求直到输入结束，并等待所有进行中的调用完成。
pub async fn serve<P, R, W>(service: Arc<InventoryService<P>>, reader: R, mut writer: W) -> anyhow::Result<()>
where
    P: SystemProbe + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut in_flight: JoinSet<MethodReply> = JoinSet::new();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line.context("failed to read request line")? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => match serde_json::from_str::<MethodCall>(&line) {
                        Ok(call) => {
                            debug!(method = %call.method, id = ?call.id, "dispatching call");
                            let service = Arc::clone(&service);
                            in_flight.spawn_blocking(move || handle_guarded(&service, call));
                        }
                        Err(err) => {
                            warn!(error = %err, "invalid request line");
                            let reply = MethodReply::error(
                                None,
                                ErrorResponse::new("INVALID_REQUEST", format!("invalid message: {err}")),
                            );
                            write_reply(&mut writer, &reply).await?;
                        }
                    },
                    None => {
                        info!(pending = in_flight.len(), "input closed, draining in-flight calls");
                        input_open = false;
                    }
                }
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                match joined {
                    Ok(reply) => write_reply(&mut writer, &reply).await?,
                    Err(err) => error!(error = %err, "call task exited with join error"),
                }
            }
            else => break,
        }
    }

    writer.flush().await.context("failed to flush replies")?;
    Ok(())
}

/// 执行单个调用；调用中途 panic 时仍为该 `id` 返回错误应答。
fn handle_guarded<P: SystemProbe>(service: &InventoryService<P>, call: MethodCall) -> MethodReply {
    let id = call.id;
    let method = call.method.clone();

    match panic::catch_unwind(AssertUnwindSafe(|| service.handle(call))) {
        Ok(reply) => reply,
        Err(_) => {
            error!(method = %method, id = ?id, "call panicked");
            MethodReply::error(
                id,
                ErrorResponse::new("INTERNAL_ERROR", format!("call to {method} panicked")),
            )
        }
    }
}

async fn write_reply<W>(writer: &mut W, reply: &MethodReply) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_string(reply).context("failed to serialize reply")?;
    json.push('\n');
    writer
        .write_all(json.as_bytes())
        .await
        .context("failed to write reply")?;
    writer.flush().await.context("failed to flush reply")?;
    Ok(())
}
