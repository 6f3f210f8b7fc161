fn main() {
    // Keep the 1280x720 canvas at its native size, centered on the page
    let css = "
        html, body {
            background-color: #000;
            margin: 0px;
            padding: 0px;
            overflow: hidden;
            width: 100vw;
            height: 100vh;
        }
        body {
            display: flex;
            align-items: center;
            justify-content: center;
        }
        canvas {
            display: block;
            outline: none;
            image-rendering: pixelated;
        }
    ";

    cargo_run_wasm::run_wasm_cli_with_css(css);
}
