pub mod payload;
pub mod record_type;
pub mod zone_record;

pub use payload::{
    split_txt, AaaaPayload, APayload, CnamePayload, MxPayload, NsPayload, RecordPayload,
    SoaPayload, SrvPayload, TxtPayload, TXT_CHUNK_LEN,
};
pub use record_type::RecordType;
pub use zone_record::{ZoneRecord, CLASS_INET};
