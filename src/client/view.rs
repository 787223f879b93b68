use super::News;

/// 门户首页的内存状态
///
/// 保存一份来自服务端的新闻快照，以及搜索、加载、错误和各弹层的
/// 打开状态。所有变更都在服务端确认之后再落到本地，没有乐观更新；
/// 加载失败不会丢弃已有数据，只写入错误槽位。
#[derive(Debug, Default)]
pub struct PortalView {
    news: Vec<News>,
    search_query: String,
    loading: bool,
    error: Option<String>,
    create_open: bool,
    detail: Option<News>,
    edit_target: Option<News>,
}

impl PortalView {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- 加载 ----

    /// 开始加载：置 loading 并清空上一次的错误。
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// 加载结束
    ///
    /// 成功则整体替换快照，失败只记录错误；loading 两种情况都清掉。
    pub fn finish_load(&mut self, result: Result<Vec<News>, String>) {
        match result {
            Ok(items) => self.set_all(items),
            Err(msg) => self.error = Some(msg),
        }
        self.loading = false;
    }

    // ---- reducer ----

    fn set_all(&mut self, items: Vec<News>) {
        self.news = items;
    }

    fn upsert_one(&mut self, item: News) {
        match self.news.iter_mut().find(|n| n.id == item.id) {
            Some(slot) => *slot = item,
            None => self.news.insert(0, item),
        }
    }

    fn remove_one(&mut self, id: i32) {
        self.news.retain(|n| n.id != id);
    }

    // ---- 搜索 ----

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// 当前搜索结果
    ///
    /// 在标题、正文、作者上做大小写不敏感的子串匹配，空查询返回
    /// 全量快照。完全在客户端进行，不访问服务端。
    pub fn filtered(&self) -> Vec<&News> {
        let q = self.search_query.trim().to_lowercase();
        if q.is_empty() {
            return self.news.iter().collect();
        }

        self.news
            .iter()
            .filter(|n| {
                n.title.to_lowercase().contains(&q)
                    || n.body.to_lowercase().contains(&q)
                    || n.author.to_lowercase().contains(&q)
            })
            .collect()
    }

    // ---- 弹层 ----

    pub fn open_create(&mut self) {
        self.create_open = true;
    }

    pub fn close_create(&mut self) {
        self.create_open = false;
    }

    pub fn open_detail(&mut self, item: News) {
        self.detail = Some(item);
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn open_edit(&mut self, item: News) {
        self.edit_target = Some(item);
    }

    pub fn close_edit(&mut self) {
        self.edit_target = None;
    }

    // ---- 变更确认 ----

    /// 创建请求的结果
    ///
    /// 成功时新条目插到最前并关闭创建弹层；失败只记录错误，
    /// 弹层状态保持不变。
    pub fn created(&mut self, result: Result<News, String>) {
        match result {
            Ok(item) => {
                self.news.insert(0, item);
                self.create_open = false;
            }
            Err(msg) => self.error = Some(msg),
        }
    }

    /// 更新请求的结果
    ///
    /// 成功时替换列表中对应条目，详情视图打开的是同一条时一并替换，
    /// 然后关闭编辑弹层；失败只记录错误。
    pub fn updated(&mut self, result: Result<News, String>) {
        match result {
            Ok(item) => {
                if let Some(detail) = &mut self.detail {
                    if detail.id == item.id {
                        *detail = item.clone();
                    }
                }
                self.upsert_one(item);
                self.edit_target = None;
            }
            Err(msg) => self.error = Some(msg),
        }
    }

    /// 删除请求的结果
    ///
    /// 成功时从快照移除，打开中的详情或编辑视图若指向该条则一并
    /// 关闭；失败只记录错误。
    pub fn removed(&mut self, id: i32, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.remove_one(id);
                if self.detail.as_ref().is_some_and(|n| n.id == id) {
                    self.detail = None;
                }
                if self.edit_target.as_ref().is_some_and(|n| n.id == id) {
                    self.edit_target = None;
                }
            }
            Err(msg) => self.error = Some(msg),
        }
    }

    // ---- 读取 ----

    pub fn news(&self) -> &[News] {
        &self.news
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn create_open(&self) -> bool {
        self.create_open
    }

    pub fn detail(&self) -> Option<&News> {
        self.detail.as_ref()
    }

    pub fn edit_target(&self) -> Option<&News> {
        self.edit_target.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;

    fn news(id: i32, title: &str, body: &str, author: &str) -> News {
        let now = Local::now();
        News {
            id,
            title: title.to_string(),
            body: body.to_string(),
            author: author.to_string(),
            image_url: None,
            date: now,
            created_at: now,
            updated_at: now,
        }
    }

    fn loaded_view() -> PortalView {
        let mut view = PortalView::new();
        view.begin_load();
        view.finish_load(Ok(vec![
            news(2, "Rust 1.80 发布", "新版本带来若干改进", "María García"),
            news(1, "数据库调优实践", "连接池参数详解", "Carlos Rodríguez"),
        ]));
        view
    }

    #[test]
    fn test_load_replaces_snapshot() {
        let view = loaded_view();
        assert!(!view.loading());
        assert!(view.error().is_none());
        assert_eq!(view.news().len(), 2);
    }

    #[test]
    fn test_load_failure_keeps_data() {
        let mut view = loaded_view();
        view.begin_load();
        assert!(view.loading());

        view.finish_load(Err("Error al obtener noticias: 500".to_string()));
        assert!(!view.loading());
        assert_eq!(view.error(), Some("Error al obtener noticias: 500"));
        // 之前加载成功的数据不丢
        assert_eq!(view.news().len(), 2);
    }

    #[test]
    fn test_search_by_author_substring() {
        let mut view = loaded_view();

        view.set_search_query("maría");
        let hits = view.filtered();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        // 大小写不敏感
        view.set_search_query("CARLOS");
        assert_eq!(view.filtered().len(), 1);
    }

    #[test]
    fn test_search_blank_query_returns_all() {
        let mut view = loaded_view();
        view.set_search_query("   ");
        assert_eq!(view.filtered().len(), 2);
    }

    #[test]
    fn test_search_no_match() {
        let mut view = loaded_view();
        view.set_search_query("不存在的关键字");
        assert!(view.filtered().is_empty());
    }

    #[test]
    fn test_create_prepends_and_closes_modal() {
        let mut view = loaded_view();
        view.open_create();

        view.created(Ok(news(3, "突发新闻", "正文", "A")));
        assert!(!view.create_open());
        assert_eq!(view.news()[0].id, 3);
        assert_eq!(view.news().len(), 3);
    }

    #[test]
    fn test_create_failure_keeps_modal_open() {
        let mut view = loaded_view();
        view.open_create();

        view.created(Err("Missing fields (title, body, author)".to_string()));
        assert!(view.create_open());
        assert_eq!(view.news().len(), 2);
        assert!(view.error().is_some());
    }

    #[test]
    fn test_update_patches_list_and_open_detail() {
        let mut view = loaded_view();
        let target = view.news()[0].clone();
        view.open_detail(target.clone());
        view.open_edit(target);

        let mut changed = news(2, "Rust 1.80 正式发布", "更新后的正文", "María García");
        changed.updated_at = Local::now();
        view.updated(Ok(changed));

        assert_eq!(view.news()[0].title, "Rust 1.80 正式发布");
        assert_eq!(view.detail().unwrap().title, "Rust 1.80 正式发布");
        assert!(view.edit_target().is_none());
    }

    #[test]
    fn test_update_other_id_leaves_detail() {
        let mut view = loaded_view();
        view.open_detail(view.news()[0].clone());

        view.updated(Ok(news(1, "改过的标题", "B", "Carlos Rodríguez")));
        assert_eq!(view.detail().unwrap().id, 2);
        assert_eq!(view.news().iter().find(|n| n.id == 1).unwrap().title, "改过的标题");
    }

    #[test]
    fn test_remove_closes_matching_views() {
        let mut view = loaded_view();
        let target = view.news()[0].clone();
        view.open_detail(target.clone());
        view.open_edit(target);

        view.removed(2, Ok(()));
        assert_eq!(view.news().len(), 1);
        assert!(view.detail().is_none());
        assert!(view.edit_target().is_none());
    }

    #[test]
    fn test_remove_failure_keeps_snapshot() {
        let mut view = loaded_view();
        view.removed(2, Err("Not found".to_string()));
        assert_eq!(view.news().len(), 2);
        assert_eq!(view.error(), Some("Not found"));
    }
}
