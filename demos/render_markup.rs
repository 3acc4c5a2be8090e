use image::{ImageBuffer, Rgba};
use kumihan::{Event, FontSystem, Paragraph, Texture, TexturePainter};

const PAGE_WIDTH: f32 = 260.0;

#[allow(clippy::unwrap_used)]
fn main() {
    // 1. Setup Font System
    let font_system = FontSystem::new();
    font_system.load_system_fonts();
    if font_system.is_empty() {
        eprintln!("No system fonts available; nothing to render.");
        return;
    }

    // 2. Build a Paragraph from markup
    let mut paragraph = Paragraph::new();
    paragraph
        .parse_markup(concat!(
            r#"<p size="16">Welcome to the <b>city archives</b>. "#,
            r#"Budget reports are filed under <a href="ledger">the ledger</a>."#,
            "<li>roads and transit</li>",
            "<li>parks and <i>monuments</i></li>",
            "</p>",
        ))
        .unwrap();
    paragraph.connect_link_clicked(|_, text| {
        println!("Link clicked: {text}");
    });

    // 3. Perform Layout
    let size = font_system.resize(&mut paragraph, PAGE_WIDTH, 0.0);
    println!("Layout Area: {:.2}x{:.2}", PAGE_WIDTH, size.height);
    println!(
        "Lines: {}, link rectangles: {}",
        paragraph.layout().unwrap().lines.len(),
        paragraph.layout().unwrap().links.len(),
    );

    // 4. Render into a page texture
    let mut page = Texture::new(PAGE_WIDTH.ceil() as usize, size.height.ceil() as usize);
    font_system.with_fonts(|fonts| {
        let mut painter = TexturePainter::new(&mut page);
        paragraph.draw(fonts, &mut painter);
    });

    // 5. Simulate a click on the first link rectangle
    if let Some(rect) = paragraph
        .layout()
        .and_then(|layout| layout.links.first())
        .map(|link| link.rect)
    {
        paragraph.event(&Event::PointerClick {
            position: rect.center(),
        });
    }

    // 6. Save Output over a paper-white background
    let width = page.width() as u32;
    let height = page.height() as u32;
    let image_buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_fn(width, height, |x, y| {
            let [r, g, b, a] = page.pixel(x as usize, y as usize).unwrap();
            let alpha = a as f32 / 255.0;
            let over = |fg: u8| (fg as f32 * alpha + 245.0 * (1.0 - alpha)).clamp(0.0, 255.0) as u8;
            Rgba([over(r), over(g), over(b), 255])
        });

    std::fs::create_dir_all("debug").expect("failed to create debug directory");
    let output_path = "debug/render_markup.png";
    image_buffer.save(output_path).expect("failed to save image");
    println!("Saved debug image to: {}", output_path);
}
