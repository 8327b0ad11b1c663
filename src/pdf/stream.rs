//! PDF content stream implementation

use log::trace;

use super::{format_number, Array, Dictionary, PDFObjectCommon, PDFString, Value};

/// PDF stream object
///
/// Holds the stream dictionary entries and the ordered list of content
/// stream tokens. Operators are appended as-is: nothing checks that `BT`/`ET`
/// or `q`/`Q` pairs match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stream {
    /// Stream dictionary, `Length` is computed at render time
    extra: Dictionary,
    /// Content stream tokens
    stream: Vec<Value>,
}

impl Stream {
    /// Create new empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Create new stream with extra dictionary entries
    pub fn with_extra(extra: Dictionary) -> Self {
        Self {
            extra,
            stream: Vec::new(),
        }
    }

    pub fn extra(&self) -> &Dictionary {
        &self.extra
    }

    pub fn extra_mut(&mut self) -> &mut Dictionary {
        &mut self.extra
    }

    /// Content stream tokens in order
    pub fn operations(&self) -> &[Value] {
        &self.stream
    }

    /// Append any value as a token
    pub fn push(&mut self, token: impl Into<Value>) {
        self.stream.push(token.into());
    }

    /// Append pre-serialized content
    pub fn append_raw(&mut self, bytes: impl Into<Vec<u8>>) {
        self.stream.push(Value::Raw(bytes.into()));
    }

    /// Stream payload, tokens joined by newlines
    pub fn payload(&self) -> Vec<u8> {
        let mut payload = Vec::new();
        for (index, token) in self.stream.iter().enumerate() {
            if index > 0 {
                payload.push(b'\n');
            }
            token.write_to(&mut payload);
        }
        payload
    }

    fn operator(&mut self, operands: &[f64], operator: &str) {
        let mut token = String::new();
        for operand in operands {
            token.push_str(&format_number(*operand));
            token.push(' ');
        }
        token.push_str(operator);
        self.stream.push(Value::Text(token));
    }

    fn named_operator(&mut self, name: &str, operator: &str) {
        self.stream.push(Value::Text(format!("/{} {}", name, operator)));
    }

    // Path construction

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.operator(&[x, y], "m");
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.operator(&[x, y], "l");
    }

    /// Cubic Bézier curve with two control points
    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.operator(&[x1, y1, x2, y2, x3, y3], "c");
    }

    /// Curve whose first control point is the current point
    pub fn curve_start_to(&mut self, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.operator(&[x2, y2, x3, y3], "v");
    }

    /// Curve whose second control point is the end point
    pub fn curve_end_to(&mut self, x1: f64, y1: f64, x3: f64, y3: f64) {
        self.operator(&[x1, y1, x3, y3], "y");
    }

    pub fn rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.operator(&[x, y, width, height], "re");
    }

    /// Close the current subpath
    pub fn close(&mut self) {
        self.operator(&[], "h");
    }

    /// End the path without filling or stroking
    pub fn end(&mut self) {
        self.operator(&[], "n");
    }

    // Painting

    pub fn stroke(&mut self) {
        self.operator(&[], "S");
    }

    pub fn stroke_and_close(&mut self) {
        self.operator(&[], "s");
    }

    pub fn fill(&mut self, even_odd: bool) {
        self.operator(&[], if even_odd { "f*" } else { "f" });
    }

    pub fn fill_and_stroke(&mut self, even_odd: bool) {
        self.operator(&[], if even_odd { "B*" } else { "B" });
    }

    pub fn fill_stroke_and_close(&mut self, even_odd: bool) {
        self.operator(&[], if even_odd { "b*" } else { "b" });
    }

    // Clipping

    pub fn clip(&mut self, even_odd: bool) {
        self.operator(&[], if even_odd { "W*" } else { "W" });
    }

    // Text

    pub fn begin_text(&mut self) {
        self.operator(&[], "BT");
    }

    pub fn end_text(&mut self) {
        self.operator(&[], "ET");
    }

    /// Select font resource `font` at `size`
    pub fn set_font_size(&mut self, font: &str, size: f64) {
        self.stream
            .push(Value::Text(format!("/{} {} Tf", font, format_number(size))));
    }

    /// Show a text string, encoded like any other PDF string
    pub fn show_text(&mut self, text: &str) {
        let mut token = PDFString::new(text).data();
        token.extend_from_slice(b" Tj");
        self.stream.push(Value::Raw(token));
    }

    /// Show strings with individual glyph positioning
    pub fn show_text_array(&mut self, items: &Array) {
        let mut token = items.data();
        token.extend_from_slice(b" TJ");
        self.stream.push(Value::Raw(token));
    }

    pub fn set_text_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.operator(&[a, b, c, d, e, f], "Tm");
    }

    /// Move to the start of the next line, offset by `(x, y)`
    pub fn move_text_to(&mut self, x: f64, y: f64) {
        self.operator(&[x, y], "Td");
    }

    pub fn set_text_rendering(&mut self, mode: u8) {
        self.operator(&[f64::from(mode)], "Tr");
    }

    pub fn set_character_spacing(&mut self, spacing: f64) {
        self.operator(&[spacing], "Tc");
    }

    pub fn set_word_spacing(&mut self, spacing: f64) {
        self.operator(&[spacing], "Tw");
    }

    pub fn set_horizontal_scaling(&mut self, scale: f64) {
        self.operator(&[scale], "Tz");
    }

    pub fn set_text_rise(&mut self, rise: f64) {
        self.operator(&[rise], "Ts");
    }

    // Graphics state

    pub fn push_state(&mut self) {
        self.operator(&[], "q");
    }

    pub fn pop_state(&mut self) {
        self.operator(&[], "Q");
    }

    /// Concatenate a matrix to the current transformation matrix
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.operator(&[a, b, c, d, e, f], "cm");
    }

    pub fn set_color_rgb(&mut self, r: f64, g: f64, b: f64, stroke: bool) {
        self.operator(&[r, g, b], if stroke { "RG" } else { "rg" });
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.operator(&[width], "w");
    }

    pub fn set_line_cap(&mut self, cap: u8) {
        self.operator(&[f64::from(cap)], "J");
    }

    pub fn set_line_join(&mut self, join: u8) {
        self.operator(&[f64::from(join)], "j");
    }

    pub fn set_miter_limit(&mut self, limit: f64) {
        self.operator(&[limit], "M");
    }

    pub fn set_dash(&mut self, dash_array: &[f64], dash_phase: f64) {
        let dashes: Array = dash_array.iter().copied().collect();
        let mut token = dashes.data();
        token.extend_from_slice(format!(" {} d", format_number(dash_phase)).as_bytes());
        self.stream.push(Value::Raw(token));
    }

    /// Apply the named graphics state parameter dictionary
    pub fn set_state(&mut self, state_name: &str) {
        self.named_operator(state_name, "gs");
    }

    // External objects

    pub fn draw_x_object(&mut self, name: &str) {
        self.named_operator(name, "Do");
    }

    pub fn paint_shading(&mut self, name: &str) {
        self.named_operator(name, "sh");
    }
}

impl PDFObjectCommon for Stream {
    fn write_to(&self, output: &mut Vec<u8>) {
        let payload = self.payload();
        trace!("Rendering stream with {} tokens", self.stream.len());

        let mut extra = self.extra.clone();
        extra.set("Length", payload.len() + 1);
        extra.write_to(output);

        output.extend_from_slice(b"\nstream\n");
        output.extend_from_slice(&payload);
        output.extend_from_slice(b"\nendstream");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_log::test;

    fn payload(stream: &Stream) -> String {
        String::from_utf8(stream.payload()).unwrap()
    }

    #[test]
    fn test_line_stream() {
        let mut stream = Stream::new();
        stream.move_to(0.0, 0.0);
        stream.line_to(10.0, 10.0);
        stream.stroke();

        assert_eq!(payload(&stream), "0 0 m\n10 10 l\nS");
        assert_eq!(
            String::from_utf8(stream.data()).unwrap(),
            "<<\n/Length 16\n>>\nstream\n0 0 m\n10 10 l\nS\nendstream"
        );
    }

    #[test]
    fn test_length_is_recomputed() {
        let mut extra = Dictionary::new();
        extra.set("Length", 999);
        extra.set_name("Subtype", "Form");
        let mut stream = Stream::with_extra(extra);
        stream.rectangle(2.0, 2.0, 5.0, 6.0);
        stream.fill(false);

        let data = String::from_utf8(stream.data()).unwrap();
        assert!(data.starts_with("<<\n/Length 13\n/Subtype /Form\n>>\nstream\n"));
        assert_eq!(stream.extra().get_integer("Length"), Some(999));
    }

    #[test]
    fn test_empty_stream() {
        let stream = Stream::new();
        assert_eq!(stream.data(), b"<<\n/Length 1\n>>\nstream\n\nendstream");
    }

    #[test]
    fn test_path_operators() {
        let mut stream = Stream::new();
        stream.curve_to(1.0, 2.0, 3.0, 4.0, 5.5, 6.0);
        stream.curve_start_to(1.0, 2.0, 3.0, 4.0);
        stream.curve_end_to(1.0, 2.0, 3.0, 4.0);
        stream.close();
        stream.clip(true);
        stream.end();
        stream.fill(true);
        stream.fill_and_stroke(false);
        stream.fill_and_stroke(true);
        stream.fill_stroke_and_close(false);
        stream.fill_stroke_and_close(true);
        stream.stroke_and_close();

        assert_eq!(
            payload(&stream),
            "1 2 3 4 5.5 6 c\n1 2 3 4 v\n1 2 3 4 y\nh\nW*\nn\nf*\nB\nB*\nb\nb*\ns"
        );
    }

    #[test]
    fn test_graphics_state_operators() {
        let mut stream = Stream::new();
        stream.push_state();
        stream.transform(1.0, 0.0, 0.0, 1.0, 72.0, 36.5);
        stream.set_color_rgb(1.0, 0.5, 0.0, false);
        stream.set_color_rgb(0.0, 0.0, 1.0, true);
        stream.set_line_width(2.0);
        stream.set_line_cap(1);
        stream.set_line_join(2);
        stream.set_miter_limit(10.0);
        stream.set_dash(&[3.0, 1.5], 0.0);
        stream.set_state("GS1");
        stream.draw_x_object("Im1");
        stream.paint_shading("Sh1");
        stream.pop_state();

        assert_eq!(
            payload(&stream),
            "q\n1 0 0 1 72 36.5 cm\n1 0.5 0 rg\n0 0 1 RG\n2 w\n1 J\n2 j\n10 M\n\
             [ 3 1.5 ] 0 d\n/GS1 gs\n/Im1 Do\n/Sh1 sh\nQ"
        );
    }

    #[test]
    fn test_text_operators() {
        let mut stream = Stream::new();
        stream.begin_text();
        stream.set_font_size("F1", 12.0);
        stream.set_text_matrix(1.0, 0.0, 0.0, 1.0, 10.0, 20.0);
        stream.move_text_to(0.0, -14.0);
        stream.set_text_rendering(3);
        stream.set_character_spacing(0.5);
        stream.set_word_spacing(1.0);
        stream.set_horizontal_scaling(90.0);
        stream.set_text_rise(-2.0);
        stream.show_text("Hello");
        stream.show_text("\u{e9}");
        stream.show_text_array(&Array::from(vec![
            Value::from(PDFString::new("A")),
            Value::from(-120),
            Value::from(PDFString::new("V")),
        ]));
        stream.end_text();

        assert_eq!(
            payload(&stream),
            "BT\n/F1 12 Tf\n1 0 0 1 10 20 Tm\n0 -14 Td\n3 Tr\n0.5 Tc\n1 Tw\n90 Tz\n-2 Ts\n\
             (Hello) Tj\n<feff00e9> Tj\n[ (A) -120 (V) ] TJ\nET"
        );
    }

    #[test]
    fn test_raw_and_nested_tokens() {
        let mut stream = Stream::new();
        stream.append_raw(b"% comment".to_vec());
        stream.push(PDFString::new("x"));
        stream.push(2.0);

        assert_eq!(payload(&stream), "% comment\n(x)\n2");
        assert_eq!(stream.operations().len(), 3);
    }
}
