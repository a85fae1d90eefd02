//! Feeds one sample of every sentence type this crate decodes through the
//! [`Parser`] facade and asserts each produces exactly one successful decode.

use std::collections::HashMap;

use tiny_nmea::{DefaultParser, Parser, PushMode, SentenceType};

#[test]
fn all_supported_messages_decode() {
    let sentences: &[(SentenceType, &[u8])] = &[
        (SentenceType::RMC, b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n"),
        (SentenceType::GGA, b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,47.0,M,,*4F\r\n"),
        (SentenceType::GNS, b"$GPGNS,123519,4807.038,N,01131.000,E,ANNNNNNNNNN,08,0.9,545.4,47.0,,,*08\r\n"),
        (SentenceType::GSA, b"$GPGSA,A,3,23,31,22,16,03,07,,,,,,,1.8,1.1,1.4*3E\r\n"),
        (SentenceType::GSV, b"$GPGSV,3,1,12,01,49,196,41,03,71,278,32,06,02,323,27,11,21,196,39*72\r\n"),
        (SentenceType::VTG, b"$GPVTG,360.0,T,348.7,M,000.0,N,000.0,K*43\r\n"),
        (SentenceType::GLL, b"$GPGLL,5107.0013414,N,11402.3279144,W,205412.00,A,A*73\r\n"),
        (SentenceType::ZDA, b"$GPZDA,160012.71,11,03,2004,-1,00*7D\r\n"),
        (SentenceType::GBS, b"$GPGBS,,1.4,1.0,3.2,,0.0,,*44\r\n"),
        (SentenceType::GST, b"$GPGST,182141.000,15.5,15.3,7.2,21.8,0.9,0.5,0.8*54\r\n"),
        (SentenceType::VDM, b"!AIVDM,1,1,,A,15M67FC000G?ufbE`FepT@3n00Sa,0*5F\r\n"),
    ];

    let mut parser: DefaultParser = Parser::new();
    for (_, wire) in sentences {
        parser.feed(wire, PushMode::Atomic).unwrap();
    }

    let mut decoded: HashMap<SentenceType, u32> = HashMap::new();
    parser.work(
        |record, _| *decoded.entry(record.sentence_type).or_insert(0) += 1,
        |talker, sentence_type, _| panic!("unexpected decode error for {talker:?} {sentence_type:?}"),
    );

    for (sentence_type, _) in sentences {
        assert_eq!(
            decoded.get(sentence_type).copied().unwrap_or(0),
            1,
            "expected exactly one decode for {sentence_type:?}"
        );
    }
    assert_eq!(parser.stats().sentences_parsed as usize, sentences.len());
}

#[test]
fn all_supported_messages_fit_the_default_ring_in_one_feed() {
    let mut parser: DefaultParser = Parser::new();
    let wire = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,47.0,M,,*4F\r\n";
    parser.feed(wire, PushMode::Atomic).unwrap();
    let mut seen = 0;
    parser.work(|_, _| seen += 1, |_, _, _| {});
    assert_eq!(seen, 1);
}
