mod bulk;
mod history;
