//! Declarative table of supported router methods.
//!
//! Each entry names the remote method, the parameters it needs, and where its
//! payload sits inside the success envelope.

use crate::core::errors::Result;
use crate::core::kernel::HttpMethod;
use crate::core::params::Params;
use crate::core::unwrap::Fallback;
use crate::core::validation::{check_required, resolve_required, Requirement};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSpec {
    /// Dotted method name sent as `method`
    pub name: &'static str,
    pub requires: &'static [Requirement],
    /// Path from the envelope to the payload
    pub path: &'static [&'static str],
    pub fallback: Fallback,
    pub http_method: HttpMethod,
}

impl MethodSpec {
    /// Look up a method by its dotted name
    pub fn find(name: &str) -> Option<&'static Self> {
        ALL_METHODS.iter().copied().find(|spec| spec.name == name)
    }

    /// Check `params` against this method's requirements
    pub fn validate(&self, params: &Params) -> Result<()> {
        check_required(params, &resolve_required(params, self.requires))
    }
}

const FIELDS: Requirement = Requirement::Key("fields");

/// `taobao.user.get`: `nick` is required unless `session` is given.
pub static USER_GET: MethodSpec = MethodSpec {
    name: "taobao.user.get",
    requires: &[
        FIELDS,
        Requirement::KeyUnless {
            key: "nick",
            unless: "session",
        },
    ],
    path: &["user_get_response", "user"],
    fallback: Fallback::Null,
    http_method: HttpMethod::Get,
};

/// `taobao.users.get`: `nicks` is a comma separated list.
pub static USERS_GET: MethodSpec = MethodSpec {
    name: "taobao.users.get",
    requires: &[FIELDS, Requirement::Key("nicks")],
    path: &["users_get_response", "users", "user"],
    fallback: Fallback::EmptyList,
    http_method: HttpMethod::Get,
};

/// `taobao.user.buyer.get`: `session` is required unless `access_token` is given.
pub static USER_BUYER_GET: MethodSpec = MethodSpec {
    name: "taobao.user.buyer.get",
    requires: &[
        FIELDS,
        Requirement::KeyUnless {
            key: "session",
            unless: "access_token",
        },
    ],
    path: &["user_buyer_get_response", "user"],
    fallback: Fallback::Null,
    http_method: HttpMethod::Get,
};

/// `taobao.user.seller.get`: `session` is required unless `access_token` is given.
pub static USER_SELLER_GET: MethodSpec = MethodSpec {
    name: "taobao.user.seller.get",
    requires: &[
        FIELDS,
        Requirement::KeyUnless {
            key: "session",
            unless: "access_token",
        },
    ],
    path: &["user_seller_get_response", "user"],
    fallback: Fallback::Null,
    http_method: HttpMethod::Get,
};

pub static SHOP_GET: MethodSpec = MethodSpec {
    name: "taobao.shop.get",
    requires: &[Requirement::Key("nick"), FIELDS],
    path: &["shop_get_response", "shop"],
    fallback: Fallback::Null,
    http_method: HttpMethod::Get,
};

pub static ITEM_GET: MethodSpec = MethodSpec {
    name: "taobao.item.get",
    requires: &[Requirement::Key("num_iid"), FIELDS],
    path: &["item_get_response", "item"],
    fallback: Fallback::EmptyObject,
    http_method: HttpMethod::Get,
};

/// Curated items of a Tmall category.
pub static SELECTED_ITEMS_SEARCH: MethodSpec = MethodSpec {
    name: "tmall.selected.items.search",
    requires: &[Requirement::Key("cid")],
    path: &[
        "tmall_selected_items_search_response",
        "item_list",
        "selected_item",
    ],
    fallback: Fallback::EmptyList,
    http_method: HttpMethod::Get,
};

pub static MESSAGE_SEND: MethodSpec = MethodSpec {
    name: "taobao.jindoucloud.message.send",
    requires: &[Requirement::Key("messages")],
    path: &[
        "jindoucloud_message_send_response",
        "send_results",
        "send_result",
    ],
    fallback: Fallback::Null,
    http_method: HttpMethod::Get,
};

/// Pull pending messages from the message channel.
pub static TMC_MESSAGES_CONSUME: MethodSpec = MethodSpec {
    name: "taobao.tmc.messages.consume",
    requires: &[],
    path: &["tmc_messages_consume_response", "messages", "tmc_message"],
    fallback: Fallback::EmptyList,
    http_method: HttpMethod::Get,
};

pub static ALL_METHODS: &[&MethodSpec] = &[
    &USER_GET,
    &USERS_GET,
    &USER_BUYER_GET,
    &USER_SELLER_GET,
    &SHOP_GET,
    &ITEM_GET,
    &SELECTED_ITEMS_SEARCH,
    &MESSAGE_SEND,
    &TMC_MESSAGES_CONSUME,
];
