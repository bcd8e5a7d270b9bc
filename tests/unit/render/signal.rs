use super::*;

#[test]
fn counter_counts_through_trait_object() {
    let mut counter = RenderCounter::new();
    {
        let sink: &mut dyn RenderSignal = &mut counter;
        sink.request_render();
        sink.request_render();
    }
    assert_eq!(counter.requests, 2);

    let mut null = NullRender;
    null.request_render();
}
