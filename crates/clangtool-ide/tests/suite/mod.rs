mod fake_engine;
mod libclang_engine;
mod navigation;
