//! Feeds visitor input into a mounted widget and waits out the last reply.

use std::time::Duration;

use embedbot_common::WidgetEvent;
use embedbot_engine::WidgetHandle;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

/// Slack on top of the presentation delay before teardown.
const REPLY_MARGIN: Duration = Duration::from_millis(50);

/// Map input lines onto widget triggers until EOF or `/quit`.
pub async fn drive<R>(handle: &WidgetHandle, input: R) -> embedbot_common::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/toggle" | "/open" | "/close" => handle.toggle(),
            "/hide" => handle.visibility_changed(true),
            "/show" => handle.visibility_changed(false),
            _ => {
                handle.input(line);
                handle.key_press("Enter", false);
            }
        }
    }
    Ok(())
}

/// Block until no chat request is outstanding and any resolved reply has
/// had `reply_delay` to land in the transcript.
pub async fn wait_for_reply(handle: &WidgetHandle, reply_delay: Duration) {
    let mut events = handle.subscribe();
    let awaiting = match handle.snapshot().await {
        Some(session) => session.is_awaiting_response(),
        None => return,
    };

    if awaiting {
        // Anything queued before the snapshot belongs to an earlier send.
        loop {
            match events.try_recv() {
                Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        loop {
            match events.recv().await {
                Ok(WidgetEvent::AwaitingChanged(false)) => break,
                Ok(WidgetEvent::TornDown) | Err(RecvError::Closed) => return,
                Ok(_) | Err(RecvError::Lagged(_)) => continue,
            }
        }
    }

    tokio::time::sleep(reply_delay + REPLY_MARGIN).await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use embedbot_client::{ChatBackend, ChatError, NoopAnalytics};
    use embedbot_config::{EmbedAttributes, WidgetSettings};
    use embedbot_engine::WidgetEngine;

    use super::*;
    use crate::terminal::TerminalView;

    struct SlowEcho(Duration);

    #[async_trait]
    impl ChatBackend for SlowEcho {
        async fn send_message(&self, _key: &str, message: &str) -> Result<String, ChatError> {
            tokio::time::sleep(self.0).await;
            Ok(format!("echo: {message}"))
        }
    }

    fn mount(latency: Duration) -> (WidgetHandle, WidgetSettings) {
        let settings = WidgetSettings::default();
        let handle = WidgetEngine::mount(
            &EmbedAttributes::new().with("data-chatbot-key", "cb_test"),
            settings.clone(),
            Arc::new(SlowEcho(latency)),
            Arc::new(NoopAnalytics),
            Box::new(TerminalView::new(std::io::sink())),
        )
        .unwrap();
        (handle, settings)
    }

    #[tokio::test(start_paused = true)]
    async fn piped_input_keeps_the_last_reply() {
        let (handle, settings) = mount(Duration::from_millis(800));

        drive(&handle, &b"Hi\n"[..]).await.unwrap();
        wait_for_reply(&handle, settings.response_delay()).await;

        let session = handle.snapshot().await.unwrap();
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].text, "echo: Hi");
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn reply_inside_presentation_delay_is_kept() {
        let (handle, settings) = mount(Duration::from_millis(10));

        drive(&handle, &b"Hi\n"[..]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!handle.snapshot().await.unwrap().is_awaiting_response());

        wait_for_reply(&handle, settings.response_delay()).await;
        assert_eq!(handle.snapshot().await.unwrap().transcript().len(), 2);
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn commands_map_to_triggers() {
        let (handle, _) = mount(Duration::from_millis(10));

        drive(&handle, &b"/toggle\n  \n/hide\n/show\n/quit\nnever sent\n"[..])
            .await
            .unwrap();

        let session = handle.snapshot().await.unwrap();
        assert!(session.is_open());
        assert!(session.transcript().is_empty());
        assert_eq!(session.message_count(), 0);
        handle.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn torn_down_widget_does_not_block_exit() {
        let (handle, settings) = mount(Duration::from_secs(3600));
        handle.shutdown();
        tokio::time::sleep(Duration::from_millis(1)).await;

        wait_for_reply(&handle, settings.response_delay()).await;
        assert!(handle.snapshot().await.is_none());
    }
}
