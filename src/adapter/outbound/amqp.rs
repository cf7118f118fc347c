//! AMQP 0-9-1 event transport (RabbitMQ).
//!
//! Each destination is a durable queue on the default exchange, so the
//! routing key is the queue name. Publishes do not wait for broker confirms.

use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::port::outbound::transport::EventTransport;

const CONTENT_TYPE: &str = "application/json";
const REPLY_SUCCESS: u16 = 200;

/// Single connection and channel to an AMQP broker.
pub struct AmqpTransport {
    connection: Connection,
    channel: Channel,
}

impl AmqpTransport {
    /// Connect to the broker and open a channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Broker`](crate::error::Error::Broker) if the
    /// connection or channel cannot be opened.
    pub async fn connect(url: &str) -> Result<Self> {
        let connection = Connection::connect(url, ConnectionProperties::default()).await?;

        let channel = match connection.create_channel().await {
            Ok(channel) => channel,
            Err(e) => {
                if let Err(close_err) = connection.close(REPLY_SUCCESS, "OK").await {
                    warn!(error = %close_err, "Failed to close broker connection");
                }
                return Err(e.into());
            }
        };

        info!(host = %redact(url), "Connected to message broker");
        Ok(Self {
            connection,
            channel,
        })
    }
}

#[async_trait]
impl EventTransport for AmqpTransport {
    async fn declare(&self, destination: &str) -> Result<()> {
        self.channel
            .queue_declare(
                destination,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;
        Ok(())
    }

    async fn send(&self, destination: &str, body: &[u8]) -> Result<()> {
        self.channel
            .basic_publish(
                "",
                destination,
                BasicPublishOptions::default(),
                body,
                BasicProperties::default().with_content_type(CONTENT_TYPE.into()),
            )
            .await?;
        debug!(queue = destination, "Message handed to broker");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        if let Err(e) = self.channel.close(REPLY_SUCCESS, "OK").await {
            warn!(error = %e, "Failed to close broker channel");
        }
        self.connection.close(REPLY_SUCCESS, "OK").await?;
        Ok(())
    }
}

/// Strip credentials from a broker URL for logging.
fn redact(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => format!(
            "{}:{}",
            parsed.host_str().unwrap_or("unknown"),
            parsed.port().unwrap_or(5672)
        ),
        Err(_) => "unknown".to_string(),
    }
}
