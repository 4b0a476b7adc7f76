#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use zonestore_dns_domain::config::StorageConfig;
use zonestore_dns_infrastructure::database::create_pool;

pub async fn create_test_pool() -> SqlitePool {
    let config = StorageConfig {
        path: "sqlite::memory:".to_string(),
        ..StorageConfig::default()
    };
    create_pool(&config).await.unwrap()
}

/// Send one UDP query and wait for the reply.
pub async fn udp_query(server: SocketAddr, qname: &str, query_type: RecordType) -> Message {
    let mut query = Query::new();
    query.set_name(Name::from_ascii(qname).unwrap());
    query.set_query_type(query_type);

    let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
    message.add_query(query);
    let bytes = message.to_bytes().unwrap();

    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(&bytes, server).await.unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(5), socket.recv_from(&mut buf))
        .await
        .expect("no reply from server")
        .unwrap();

    Message::from_vec(&buf[..len]).unwrap()
}
