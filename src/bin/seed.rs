use chrono::{Local, TimeZone};

use newsdesk::storage::{self, NewsDraft, Querier, Store};

/// 向空库写入两条示例新闻，表里已有数据时跳过。
#[tokio::main]
async fn main() {
    let pool = storage::init_db_from_env().await;

    let existing = pool.list_all().await.expect("查询 news 表失败");
    if !existing.is_empty() {
        println!("news 表非空，跳过 seed");
        return;
    }

    for draft in samples() {
        let created = pool
            .create(&draft, None)
            .await
            .expect("写入示例新闻失败");
        println!("seeded #{}: {}", created.id, created.title);
    }
}

fn samples() -> Vec<NewsDraft> {
    vec![
        NewsDraft {
            title: "Avances en Inteligencia Artificial revolucionan la búsqueda semántica"
                .to_string(),
            body: "Los nuevos modelos de lenguaje están transformando la manera en que \
                   buscamos y encontramos información..."
                .to_string(),
            author: "María García".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            date: Local.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).single(),
        },
        NewsDraft {
            title: "Next.js 15 introduce nuevas funcionalidades para desarrolladores".to_string(),
            body: "La última versión del framework de React incluye mejoras significativas \
                   en performance..."
                .to_string(),
            author: "Carlos Rodríguez".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1555949963-aa79dcee981c?w=500&h=300&fit=crop"
                    .to_string(),
            ),
            date: Local.with_ymd_and_hms(2024, 3, 14, 14, 20, 0).single(),
        },
    ]
}
