mod insert_record;

pub use insert_record::InsertRecordUseCase;
