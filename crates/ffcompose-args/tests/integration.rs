//! Integration tests for ffcompose-args

use ffcompose_args::{
    escape, Command, DirectoryFontResolver, DrawText, Error, ExpressionSource, Filter,
    FilterChain, FilterGraph, FlagSet, Input, Label, Map, NoiseColor, NoiseSource, Output,
    StreamType, Subtitles, Value, VirtualSource,
};

fn freefont() -> DirectoryFontResolver {
    DirectoryFontResolver::new("/usr/share/fonts/truetype/freefont")
}

/// Absent values contribute no tokens, present ones exactly two, in order
#[test]
fn test_flag_set_token_counts() {
    let flags = FlagSet::new()
        .with("preset", "fast")
        .with_opt("tune", None::<&str>)
        .with("crf", 23)
        .with_opt("g", Some(48))
        .with("faststart", true);

    let args = flags.to_args();
    assert_eq!(args.len(), 8);
    assert_eq!(
        args,
        ["-preset", "fast", "-crf", "23", "-g", "48", "-faststart", "1"]
    );
}

/// Escaping twice must be observably different from escaping once
#[test]
fn test_escape_once_vs_twice() {
    let once = escape("10:30, it's [live]");
    let twice = escape(once.as_str());
    assert_ne!(once.as_str(), twice.as_str());

    // The filter stores the once-escaped value verbatim.
    let filter = Filter::new("drawtext")
        .unwrap()
        .option("text", once.clone());
    assert_eq!(
        filter.render().unwrap(),
        format!("drawtext=text={}", once.as_str())
    );
}

/// A map at index 0 with a video type shortcut
#[test]
fn test_map_codec_scenario() {
    let mut cmd = Command::new();
    let src = cmd.add_input(Input::file("in.mp4").unwrap());
    let map = Map::new(src.video())
        .stream_type(StreamType::Video)
        .suffix_flags(FlagSet::new().with("c", "libx264"));
    assert_eq!(map.build(0), ["-c:v:0", "libx264"]);
}

/// Suffix flags only ever carry the index they were built with
#[test]
fn test_map_index_qualification() {
    let map = Map::new(Label::new("outa").unwrap())
        .stream_type(StreamType::Audio)
        .suffix_flag("c", "aac")
        .suffix_flag("b", "128k")
        .flag("ac", 2);

    for index in 0..5usize {
        let args = map.build(index);
        let qualified: Vec<_> = args.iter().filter(|a| a.starts_with("-c:") || a.starts_with("-b:")).collect();
        assert_eq!(qualified.len(), 2);
        for flag in qualified {
            assert!(flag.ends_with(&format!(":{index}")), "{flag} at {index}");
        }
    }
}

#[test]
fn test_drawtext_scenario() {
    let filter = DrawText::new("Hello: World", 10, 20)
        .build_with(&freefont())
        .unwrap();

    let text = filter.flags().get("text").unwrap();
    assert!(text.is_escaped());
    assert_eq!(text.to_string(), r"Hello\\: World");

    assert_eq!(
        filter.render().unwrap(),
        r"drawtext=text=Hello\\: World:fontfile=/usr/share/fonts/truetype/freefont/arial.ttf:fontsize=16:x=10:y=20:fontcolor=white"
    );
}

#[test]
fn test_subtitles_scenario() {
    let filter = Subtitles::new("subs.ass")
        .original_size(1920, 1080)
        .build()
        .unwrap();

    assert_eq!(
        filter.flags().get("original_size"),
        Some(&Value::from("1920x1080"))
    );
    for key in [
        "fontsdir",
        "alpha",
        "charenc",
        "stream_index",
        "force_style",
        "wrap_unicode",
    ] {
        assert!(filter.flags().get(key).is_none(), "{key} should be absent");
    }
    assert_eq!(
        filter.render().unwrap(),
        "subtitles=filename=subs.ass:original_size=1920x1080"
    );
}

#[test]
fn test_output_two_maps_scenario() {
    let mut cmd = Command::new();
    let src = cmd.add_input(Input::file("in.mp4").unwrap());
    let output = Output::new(
        "out.mp4",
        [
            Map::new(src.video())
                .stream_type(StreamType::Video)
                .suffix_flag("c", "libx264"),
            Map::new(src.audio())
                .stream_type(StreamType::Audio)
                .suffix_flag("c", "aac"),
        ],
    )
    .unwrap()
    .with_metadata("title", "t");

    assert_eq!(
        output.build_with_maps(),
        ["-c:v:0", "libx264", "-c:a:1", "aac", "-metadata", "title=t", "out.mp4"]
    );
    assert_eq!(output.build().last().map(String::as_str), Some("out.mp4"));
}

#[test]
fn test_full_command() {
    let mut cmd = Command::new().hide_banner(true).overwrite(true);
    let video = cmd.add_input(Input::file("talk.mp4").unwrap().seek(1.5));
    let hum = cmd.add_input(
        NoiseSource {
            color: NoiseColor::Pink,
            amplitude: 0.1,
            duration: Some(30.0),
            ..Default::default()
        }
        .input()
        .unwrap(),
    );

    let title = DrawText::new("Q&A: part 1", "(w-text_w)/2", 40)
        .fontsize(48)
        .build_with(&freefont())
        .unwrap()
        .enable_between(0.0, 4.0);
    let subs = Subtitles::new("talk.ass").build().unwrap();

    let outv = Label::new("outv").unwrap();
    let outa = Label::new("outa").unwrap();
    let graph = FilterGraph::new()
        .chain(
            FilterChain::new([title, subs])
                .unwrap()
                .input(video.video())
                .output(outv.clone()),
        )
        .chain(
            FilterChain::new([Filter::new("amix").unwrap().option("inputs", 2)])
                .unwrap()
                .input(video.audio())
                .input(hum.audio())
                .output(outa.clone()),
        );
    cmd.set_filter_graph(graph);

    cmd.add_output(
        Output::new(
            "final.mp4",
            [
                Map::new(&outv)
                    .stream_type(StreamType::Video)
                    .suffix_flag("c", "libx264"),
                Map::new(&outa)
                    .stream_type(StreamType::Audio)
                    .suffix_flag("c", "aac")
                    .with_metadata("language", "eng"),
            ],
        )
        .unwrap()
        .flag("movflags", "+faststart")
        .with_metadata("title", "Q&A"),
    );

    let args = cmd.build().unwrap();
    assert_eq!(
        args,
        [
            "-hide_banner",
            "-y",
            "-ss",
            "1.5",
            "-i",
            "talk.mp4",
            "-f",
            "lavfi",
            "-i",
            "anoisesrc=color=pink:amplitude=0.1:r=44100:d=30",
            "-filter_complex",
            r"[0:v]drawtext=text=Q&A\\: part 1:fontfile=/usr/share/fonts/truetype/freefont/arial.ttf:fontsize=48:x=(w-text_w)/2:y=40:fontcolor=white:enable=between(t\,0\,4),subtitles=filename=talk.ass[outv];[0:a][1:a]amix=inputs=2[outa]",
            "-map",
            "[outv]",
            "-c:v:0",
            "libx264",
            "-map",
            "[outa]",
            "-c:a:1",
            "aac",
            "-metadata:a",
            "language=eng",
            "-movflags",
            "+faststart",
            "-metadata",
            "title=Q&A",
            "final.mp4",
        ]
    );

    // Rendering twice yields identical tokens.
    assert_eq!(args, cmd.build().unwrap());
}

#[test]
fn test_expression_input_escaped_for_lavfi() {
    let mut cmd = Command::new();
    let wave = ExpressionSource {
        duration: Some(2.0),
        ..ExpressionSource::new("abs(mod(n*0.01,2)-1)")
    };
    let handle = cmd.add_input(wave.input().unwrap());
    cmd.add_output(Output::new("wave.wav", [Map::new(handle.audio())]).unwrap());
    assert_eq!(
        cmd.build().unwrap(),
        [
            "-f",
            "lavfi",
            "-i",
            r"aevalsrc=exprs=abs(mod(n*0.01\,2)-1):d=2",
            "-map",
            "0:a",
            "wave.wav",
        ]
    );
}

#[test]
fn test_unescaped_text_fails_loudly() {
    let mut cmd = Command::new();
    let src = cmd.add_input(Input::file("in.mp4").unwrap());
    cmd.add_chain(
        FilterChain::new([Filter::new("drawtext").unwrap().option("text", "a;b")])
            .unwrap()
            .input(src.video()),
    );
    assert!(matches!(cmd.build(), Err(Error::UnescapedValue { .. })));
}

#[test]
fn test_construction_errors_fail_fast() {
    assert!(matches!(Filter::new(""), Err(Error::Configuration { .. })));
    assert!(matches!(Output::new("", []), Err(Error::Configuration { .. })));
    assert!(matches!(
        Subtitles::new("").build(),
        Err(Error::Configuration { .. })
    ));
    assert!(matches!(Label::new(""), Err(Error::Configuration { .. })));
}
