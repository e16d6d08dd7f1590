//! Demo ticket data
//!
//! Served to anonymous sessions and on failed reads. Returned by value;
//! never persisted.

use shared::models::ticket::Ticket;

/// The fixed demo ticket set.
pub fn demo_tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            id: "T001".into(),
            title: "系统登录异常".into(),
            type_code: "1".into(),
            status_code: "1".into(),
            description: "用户反馈无法正常登录系统，提示密码错误，但密码确认无误".into(),
            contact: "张三".into(),
            phone: "13800138001".into(),
            remarks: "需要优先处理，影响用户正常使用".into(),
        },
        Ticket {
            id: "T002".into(),
            title: "服务器故障维修".into(),
            type_code: "3".into(),
            status_code: "3".into(),
            description: "服务器出现故障，需要紧急维修处理".into(),
            contact: "李四".into(),
            phone: "13800138002".into(),
            remarks: "硬件故障，需要更换配件".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_set_is_fixed_and_valid() {
        let tickets = demo_tickets();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].id, "T001");
        assert_eq!(tickets[1].id, "T002");
        for ticket in &tickets {
            assert!(
                shared::models::ticket::type_table()
                    .label(&ticket.type_code)
                    .is_some()
            );
            assert!(
                shared::models::ticket::status_table()
                    .label(&ticket.status_code)
                    .is_some()
            );
        }
    }
}
