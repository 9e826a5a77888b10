mod renderer;

pub use renderer::PageRenderer;
