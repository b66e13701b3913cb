mod common;

use common::mock_client;
use futures::future::join_all;
use serde_json::{json, Value};
use topclient::top::methods::{ALL_METHODS, USERS_GET, USER_GET};
use topclient::{params, Params, TopError};

#[cfg(test)]
mod unwrap_tests {
    use super::*;

    #[tokio::test]
    async fn test_user_get_unwraps_user() {
        let (client, transport) = mock_client(&[r#"{"user_get_response":{"user":{"nick":"a"}}}"#]);
        let user = client
            .user_get(params! { "fields" => "nick", "nick" => "a" })
            .await
            .unwrap();
        assert_eq!(user, json!({"nick": "a"}));
        assert_eq!(transport.last_request().params["method"], "taobao.user.get");
    }

    #[tokio::test]
    async fn test_invalid_method_yields_no_payload() {
        let (client, _) = mock_client(&[r#"{"error_response":{"code":22,"msg":"Invalid method"}}"#]);
        let result = client
            .user_get(params! { "fields" => "nick", "session" => "s" })
            .await;
        match result {
            Err(err) => assert_eq!(err.remote_code(), Some(22)),
            Ok(value) => panic!("expected error, got {}", value),
        }
    }

    #[tokio::test]
    async fn test_users_get_defaults_to_empty_list() {
        let (client, _) = mock_client(&[r#"{"users_get_response":{"total_results":0}}"#]);
        let users = client
            .users_get(params! { "fields" => "nick", "nicks" => "x,y" })
            .await
            .unwrap();
        assert_eq!(users, json!([]));

        let typed = client
            .users(params! { "fields" => "nick", "nicks" => "x,y" })
            .await
            .unwrap();
        assert!(typed.is_empty());
    }

    #[tokio::test]
    async fn test_fallbacks_per_method() {
        let (client, _) = mock_client(&["{}"]);

        let item = client
            .item_get(params! { "num_iid" => 13088700250_u64, "fields" => "title" })
            .await
            .unwrap();
        assert_eq!(item, json!({}));

        let shop = client
            .shop_get(params! { "nick" => "no-shop", "fields" => "sid" })
            .await
            .unwrap();
        assert_eq!(shop, Value::Null);
        assert!(client
            .shop(params! { "nick" => "no-shop", "fields" => "sid" })
            .await
            .unwrap()
            .is_none());

        let sent = client
            .message_send(params! { "messages" => json!([]) })
            .await
            .unwrap();
        assert_eq!(sent, Value::Null);

        let items = client
            .selected_items_search(params! { "cid" => 1101 })
            .await
            .unwrap();
        assert_eq!(items, json!([]));
    }

    #[tokio::test]
    async fn test_selected_items_typed() {
        let body = r#"{"tmall_selected_items_search_response":{"item_list":{"selected_item":[{"cid":1101,"num_iid":13088700250,"shop_id":59227746,"item_score":"67.33659988217163"}]}}}"#;
        let (client, _) = mock_client(&[body]);
        let items = client.selected_items(params! { "cid" => 1101 }).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].num_iid, 13_088_700_250);
        assert_eq!(items[0].item_score.as_deref(), Some("67.33659988217163"));
    }

    #[tokio::test]
    async fn test_message_send_encodes_messages_as_json() {
        let body = r#"{"jindoucloud_message_send_response":{"send_results":{"send_result":[{"is_success":true}]}}}"#;
        let (client, transport) = mock_client(&[body]);
        let messages = json!([{"receiver_nick": "sandbox_c_1", "title": "hi"}]);

        let result = client
            .message_send(params! { "messages" => messages.clone() })
            .await
            .unwrap();
        assert_eq!(result, json!([{"is_success": true}]));

        let sent = transport.last_request();
        let decoded: Value = serde_json::from_str(&sent.params["messages"]).unwrap();
        assert_eq!(decoded, messages);
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_parameter_never_reaches_transport() {
        let (client, transport) = mock_client(&["{}"]);

        let err = client.users_get(params! { "fields" => "nick" }).await.unwrap_err();
        assert!(matches!(err, TopError::ParameterMissing { ref key } if key == "nicks"));

        let err = client.user_get(params! { "fields" => "nick" }).await.unwrap_err();
        assert_eq!(err.to_string(), "`nick` required");

        let err = client
            .user_seller_get(params! { "fields" => "nick" })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "`session` required");

        let err = client.selected_items_search(Params::new()).await.unwrap_err();
        assert_eq!(err.kind(), "ParameterMissingError");

        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_nick_or_session_accepted_alone() {
        let (client, transport) = mock_client(&[r#"{"user_get_response":{"user":{"nick":"a"}}}"#]);

        client
            .user_get(params! { "fields" => "nick", "nick" => "a" })
            .await
            .unwrap();
        client
            .user_get(params! { "fields" => "nick", "session" => "token" })
            .await
            .unwrap();
        assert_eq!(transport.requests().len(), 2);
    }

    #[test]
    fn test_table_is_complete() {
        let names: Vec<_> = ALL_METHODS.iter().map(|spec| spec.name).collect();
        for expected in [
            "taobao.user.get",
            "taobao.users.get",
            "taobao.user.buyer.get",
            "taobao.user.seller.get",
            "taobao.shop.get",
            "taobao.item.get",
            "tmall.selected.items.search",
            "taobao.jindoucloud.message.send",
            "taobao.tmc.messages.consume",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
    }
}

#[cfg(test)]
mod concurrency_tests {
    use super::*;

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let body = r#"{"users_get_response":{"users":{"user":[{"nick":"a"},{"nick":"b"}]}}}"#;
        let (client, transport) = mock_client(&[body]);

        let calls = (0..20).map(|i| {
            let client = client.clone();
            async move {
                client
                    .call(&USERS_GET, params! { "fields" => "nick", "nicks" => format!("a,b,{}", i) })
                    .await
            }
        });
        let results = join_all(calls).await;

        assert_eq!(results.len(), 20);
        for result in results {
            assert_eq!(result.unwrap().as_array().map(Vec::len), Some(2));
        }
        assert_eq!(transport.requests().len(), 20);
    }

    #[tokio::test]
    async fn test_spawned_calls_share_client() {
        let (client, _) = mock_client(&[r#"{"user_get_response":{"user":{"nick":"a"}}}"#]);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move {
                    client
                        .call_as::<Value>(&USER_GET, params! { "fields" => "nick", "nick" => "a" })
                        .await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap()["nick"], "a");
        }
    }
}
