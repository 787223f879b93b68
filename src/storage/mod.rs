mod models;
mod postgres;
mod querier;
mod store;

pub use self::{
    models::{NewsDraft, NewsRecord},
    postgres::{Db, init_db_from_env, migrate},
    querier::Querier,
    store::Store,
};
