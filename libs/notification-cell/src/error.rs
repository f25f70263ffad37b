use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Subscriber {subscription_id} failed: {source}")]
    SubscriberFailed {
        subscription_id: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error("Subscriber {subscription_id} panicked: {message}")]
    SubscriberPanicked { subscription_id: u64, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
