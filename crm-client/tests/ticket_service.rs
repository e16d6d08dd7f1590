// crm-client/tests/ticket_service.rs
// Facade policy tests against a scripted gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use crm_client::{
    ClientError, ClientResult, CrmGateway, CrmTicket, DeleteResponse, ObjectData, ObjectResponse,
    RecordId, Ticket, TicketService, demo_tickets,
};

fn sample_ticket() -> Ticket {
    Ticket {
        id: "local-1".into(),
        title: "打印机无法联网".into(),
        type_code: "3".into(),
        status_code: "1".into(),
        description: "门店打印机频繁掉线".into(),
        contact: "王五".into(),
        phone: "13800138003".into(),
        remarks: "周末上门".into(),
    }
}

#[derive(Default)]
struct ScriptedGateway {
    authenticated: bool,
    fail_query: bool,
    fail_create: bool,
    reject_update: bool,
    delete_code: Option<String>,
    query_calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CrmGateway for ScriptedGateway {
    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    async fn query(&self, _xoql: &str) -> ClientResult<Vec<CrmTicket>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_query {
            return Err(ClientError::Network("connection reset by peer".into()));
        }
        Ok(vec![CrmTicket::from(&sample_ticket())])
    }

    async fn get(&self, _entity_type: &str, _id: &str) -> ClientResult<ObjectResponse> {
        Ok(ObjectResponse::default())
    }

    async fn create(
        &self,
        _entity_type: &str,
        _data: serde_json::Value,
    ) -> ClientResult<ObjectResponse> {
        if self.fail_create {
            return Err(ClientError::Api {
                status: 500,
                body: "internal error".into(),
            });
        }
        Ok(ObjectResponse {
            success: Some(true),
            message: None,
            data: Some(ObjectData {
                id: Some(RecordId::Text("99".into())),
                extra: Default::default(),
            }),
        })
    }

    async fn update(
        &self,
        _entity_type: &str,
        _id: &str,
        _data: serde_json::Value,
    ) -> ClientResult<ObjectResponse> {
        if self.reject_update {
            return Ok(ObjectResponse {
                success: Some(false),
                message: Some("字段校验失败".into()),
                data: None,
            });
        }
        Ok(ObjectResponse::default())
    }

    async fn delete(&self, _entity_type: &str, _id: &str) -> ClientResult<DeleteResponse> {
        Ok(DeleteResponse {
            code: self.delete_code.clone(),
            msg: Some("记录不存在".into()),
            data: None,
        })
    }
}

#[tokio::test]
async fn anonymous_list_serves_demo_data_without_queries() {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = TicketService::new(ScriptedGateway {
        authenticated: false,
        query_calls: calls.clone(),
        ..Default::default()
    });

    let tickets = service.list().await.unwrap();
    assert_eq!(tickets, demo_tickets());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn authenticated_list_decodes_records() {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = TicketService::new(ScriptedGateway {
        authenticated: true,
        query_calls: calls.clone(),
        ..Default::default()
    });

    let tickets = service.list().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(tickets, vec![sample_ticket()]);
}

#[tokio::test]
async fn list_swallows_gateway_errors() {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = TicketService::new(ScriptedGateway {
        authenticated: true,
        fail_query: true,
        query_calls: calls.clone(),
        ..Default::default()
    });

    let tickets = service.list().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(tickets, demo_tickets());
}

#[tokio::test]
async fn create_propagates_api_errors() {
    let service = TicketService::new(ScriptedGateway {
        authenticated: true,
        fail_create: true,
        ..Default::default()
    });

    let err = service.create(sample_ticket()).await.unwrap_err();
    match err {
        ClientError::Operation { op, source } => {
            assert_eq!(op, "create ticket");
            assert!(matches!(*source, ClientError::Api { status: 500, .. }));
        }
        other => panic!("expected operation error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_adopts_server_assigned_id() {
    let service = TicketService::new(ScriptedGateway {
        authenticated: true,
        ..Default::default()
    });

    let input = sample_ticket();
    let created = service.create(input.clone()).await.unwrap();
    assert_eq!(created.id, "99");
    assert_eq!(created.title, input.title);
    assert_eq!(created.type_code, input.type_code);
    assert_eq!(created.status_code, input.status_code);
    assert_eq!(created.description, input.description);
    assert_eq!(created.contact, input.contact);
    assert_eq!(created.phone, input.phone);
    assert_eq!(created.remarks, input.remarks);
}

#[tokio::test]
async fn create_records_tracked_ids() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = crm_client::TicketIdStore::new(dir.path());
    let service = TicketService::new(ScriptedGateway {
        authenticated: true,
        ..Default::default()
    })
    .with_id_tracker(store.clone());

    service.create(sample_ticket()).await.unwrap();
    assert_eq!(store.all(), vec!["99".to_string()]);
}

#[tokio::test]
async fn anonymous_writes_are_local_only() {
    let service = TicketService::new(ScriptedGateway::default());

    let ticket = sample_ticket();
    assert_eq!(service.create(ticket.clone()).await.unwrap(), ticket);
    assert_eq!(service.update(ticket.clone()).await.unwrap(), ticket);
    assert!(service.delete(&ticket.id).await.unwrap());
}

#[tokio::test]
async fn update_failure_propagates() {
    let service = TicketService::new(ScriptedGateway {
        authenticated: true,
        reject_update: true,
        ..Default::default()
    });

    let err = service.update(sample_ticket()).await.unwrap_err();
    match err {
        ClientError::Operation { op, source } => {
            assert_eq!(op, "update ticket");
            assert!(matches!(*source, ClientError::InvalidResponse(_)));
        }
        other => panic!("expected operation error, got {other:?}"),
    }
}

#[tokio::test]
async fn update_success_echoes_ticket() {
    let service = TicketService::new(ScriptedGateway {
        authenticated: true,
        ..Default::default()
    });

    let ticket = sample_ticket();
    assert_eq!(service.update(ticket.clone()).await.unwrap(), ticket);
}

#[tokio::test]
async fn delete_requires_success_code() {
    let accepted = TicketService::new(ScriptedGateway {
        authenticated: true,
        delete_code: Some("200".into()),
        ..Default::default()
    });
    assert!(accepted.delete("42").await.unwrap());

    let rejected = TicketService::new(ScriptedGateway {
        authenticated: true,
        delete_code: Some("500".into()),
        ..Default::default()
    });
    let err = rejected.delete("42").await.unwrap_err();
    match err {
        ClientError::Operation { op, .. } => assert_eq!(op, "delete ticket"),
        other => panic!("expected operation error, got {other:?}"),
    }
}

#[tokio::test]
async fn anonymous_get_reads_demo_data() {
    let service = TicketService::new(ScriptedGateway::default());
    let ticket = service.get("T001").await.unwrap().unwrap();
    assert_eq!(ticket.title, "系统登录异常");
    assert!(service.get("nope").await.unwrap().is_none());
}
