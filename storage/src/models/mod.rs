mod chat_history_record;

pub use chat_history_record::ChatHistoryRecord;
