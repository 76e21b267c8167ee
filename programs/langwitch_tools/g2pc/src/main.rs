use g2pc::features::features_to_json;
use g2pc::{ChineseSegmenter, Decoder, Dictionary, G2p, PinyinDecoder, Segmenter, TaggedSegmenter};
use log::{error, info, warn, LevelFilter};
use term_macros::{logger, readin, tool};

fn run<S: Segmenter, D: Decoder>(g2p: &G2p<S, D>, dump_features: bool) {
    readin!(wtr, |line: &[u8]| {
        let line = match std::str::from_utf8(line) {
            Ok(line) => line,
            Err(_) => {
                warn!("skipping a line that isn't utf-8");
                return;
            }
        };
        if dump_features {
            match g2p.features(line) {
                Ok(features) => {
                    let _ = writeln!(wtr, "{}", features_to_json(&features));
                }
                Err(e) => error!("{}", e),
            }
            return;
        }
        match g2p.convert(line) {
            Ok(tokens) => {
                for token in tokens {
                    let _ = writeln!(wtr, "{}", token.to_tsv());
                }
                let r = writeln!(wtr);
                if r.is_err() {
                    panic!("Unable to write")
                }
            }
            Err(e) => error!("{}", e),
        }
    });
}

fn main() {
    tool! {
        args:
            - dict: String;
                ? !std::path::Path::new(&dict).exists()
                => "no such dictionary file (CC-CEDICT text or .json)"
            - pos: String = "n".to_string();
            - tagged;
            - dump_features;
            - verbose;
        ;

        body: || {
            logger::init(if verbose { LevelFilter::Debug } else { LevelFilter::Info });
            let dictionary = match Dictionary::load(&dict) {
                Ok(dictionary) => dictionary,
                Err(e) => {
                    error!("couldn't load {}: {}", dict, e);
                    std::process::exit(1);
                }
            };
            info!("{} dictionary entries", dictionary.len());
            if tagged {
                run(&G2p::new(dictionary, TaggedSegmenter::new(pos), PinyinDecoder), dump_features);
            } else {
                run(&G2p::new(dictionary, ChineseSegmenter::with_pos(pos), PinyinDecoder), dump_features);
            }
        }
    }
}
