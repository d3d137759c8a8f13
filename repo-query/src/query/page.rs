//! 페이지네이션 타입
//!
//! 페이지 요청, 정렬, 페이지 결과, 대용량 페이지 처리 콜백

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 기본 페이지 크기
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

/// Ordered list of sort orders. Empty means unsorted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    pub fn unsorted() -> Self {
        Self::default()
    }

    pub fn by(property: impl Into<String>, direction: Direction) -> Self {
        Self::unsorted().and(property, direction)
    }

    pub fn and(mut self, property: impl Into<String>, direction: Direction) -> Self {
        self.orders.push(Order {
            property: property.into(),
            direction,
        });
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_sorted(&self) -> bool {
        !self.orders.is_empty()
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageRequest")]
pub struct PageRequest {
    page: usize,
    size: usize,
    sort: Sort,
}

/// Wire form of [`PageRequest`]; decoding goes through `PageRequest::of`.
#[derive(Deserialize)]
struct RawPageRequest {
    page: usize,
    size: usize,
    #[serde(default)]
    sort: Sort,
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        PageRequest::of(raw.page, raw.size).with_sort(raw.sort)
    }
}

impl PageRequest {
    /// `size` of 0 is raised to 1.
    pub fn of(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Sort::unsorted(),
        }
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page + 1,
            ..self.clone()
        }
    }

    pub fn previous_or_first(&self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self.clone()
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the total element count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    content: Vec<T>,
    request: PageRequest,
    total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            request,
            total_elements,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    pub fn number(&self) -> usize {
        self.request.page()
    }

    pub fn size(&self) -> usize {
        self.request.size()
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        match self.request.size() as u64 {
            0 => 0,
            size => self.total_elements.div_ceil(size),
        }
    }

    pub fn has_next(&self) -> bool {
        (self.number() as u64 + 1) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number() > 0
    }

    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            request: self.request,
            total_elements: self.total_elements,
        }
    }
}

/// Consumer for producer-style iteration over a large result.
///
/// The facade fetches `page_size()` rows at a time and hands each batch to
/// `on_page` instead of collecting the whole result in memory.
pub trait PageWork: Send + Sync {
    fn page_size(&self) -> usize {
        DEFAULT_PAGE_SIZE
    }

    /// `page_number` is zero-based. Returning an error stops the iteration.
    fn on_page(&self, rows: Vec<Value>, page_number: usize) -> Result<(), String>;
}
