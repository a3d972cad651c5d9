use crossbeam::channel::{Receiver, Sender, unbounded};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// One forwarded log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Forwards log records to a channel.
pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    max_level: LevelFilter,
}

impl Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // Receiver gone means nobody is listening any more.
            let _ = self.sender.try_send(LogMessage {
                level: record.level(),
                target: record.target().to_owned(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

impl ChannelLogger {
    pub fn new(sender: Sender<LogMessage>, max_level: LevelFilter) -> Self {
        Self { sender, max_level }
    }

    /// Create a logger together with the receiving end of its channel.
    pub fn with_receiver(max_level: LevelFilter) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender, max_level), receiver)
    }

    /// Install a channel logger as the global logger.
    ///
    /// Fails if a global logger has already been set.
    pub fn install(max_level: LevelFilter) -> Result<Receiver<LogMessage>, SetLoggerError> {
        let (logger, receiver) = Self::with_receiver(max_level);
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(max_level);
        Ok(receiver)
    }
}
