use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 分页信息，字段缺失时按 0 处理
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

/// Paged content envelope, the `data` part of an [`ApiContentResponse`](super::ApiContentResponse).
///
/// ```json
/// {
///   "content": [...],
///   "pageable": {"pageNumber": 2, "pageSize": 10},
///   "totalPages": 5,
///   "additionalData": {"any": "thing"}
/// }
/// ```
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse<T> {
    pub content: Option<T>,
    pub pageable: Option<Pageable>,
    pub total_pages: Option<u32>,
    pub additional_data: Option<Map<String, Value>>,
}

impl<T> ContentResponse<T> {
    pub fn total_pages(&self) -> u32 {
        self.total_pages.unwrap_or(0)
    }

    pub fn page_number(&self) -> u32 {
        self.pageable.and_then(|p| p.page_number).unwrap_or(0)
    }

    pub fn page_size(&self) -> u32 {
        self.pageable.and_then(|p| p.page_size).unwrap_or(0)
    }

    /// 当前页第一条数据的下标：`page_size * page_number`
    pub fn offset(&self) -> u64 {
        u64::from(self.page_size()) * u64::from(self.page_number())
    }
}

#[test]
fn offset_from_pageable() {
    let json = r#"{"content":[1,2,3],"pageable":{"pageNumber":2,"pageSize":10},"totalPages":4}"#;
    let page: ContentResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
    assert_eq!(page.page_number(), 2);
    assert_eq!(page.page_size(), 10);
    assert_eq!(page.offset(), 20);
    assert_eq!(page.total_pages(), 4);
    assert_eq!(page.content, Some(vec![1, 2, 3]));
}

#[test]
fn defaults_when_absent() {
    let page: ContentResponse<Vec<i32>> = serde_json::from_str("{}").unwrap();
    assert_eq!(page.total_pages(), 0);
    assert_eq!(page.page_number(), 0);
    assert_eq!(page.offset(), 0);
    assert!(page.content.is_none());

    // pageable 存在但只有部分字段
    let page: ContentResponse<()> =
        serde_json::from_str(r#"{"pageable":{"pageNumber":3}}"#).unwrap();
    assert_eq!(page.page_number(), 3);
    assert_eq!(page.offset(), 0);
}

#[test]
fn additional_data_is_kept() {
    let json = r#"{"content":null,"additionalData":{"cartCount":7,"label":"promo"}}"#;
    let page: ContentResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
    let extra = page.additional_data.unwrap();
    assert_eq!(extra["cartCount"], 7);
    assert_eq!(extra["label"], "promo");
}

#[test]
fn offset_does_not_overflow() {
    let page = ContentResponse::<()> {
        content: None,
        pageable: Some(Pageable {
            page_number: Some(u32::MAX),
            page_size: Some(u32::MAX),
        }),
        total_pages: None,
        additional_data: None,
    };
    assert_eq!(page.offset(), u64::from(u32::MAX) * u64::from(u32::MAX));
}
