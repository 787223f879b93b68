mod api;
mod view;

pub use self::{
    api::{News, NewsInput, PortalApi},
    view::PortalView,
};
