//! End-to-end coverage through the [`Parser`] facade, one test per concrete
//! scenario from SPEC_FULL.md's testable-properties section.

use tiny_nmea::{DefaultParser, Error, Parser, Payload, PushMode, SentenceType, Talker};

/// Scenario 1: a single RMC sentence, fed whole, yields exactly one callback
/// with every field matching the wire.
#[test]
fn scenario_1_rmc_single_sentence() {
    let mut parser: DefaultParser = Parser::new();
    parser
        .feed(
            b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n",
            PushMode::Atomic,
        )
        .unwrap();

    let mut seen = 0;
    parser.work(
        |record, _stats| {
            seen += 1;
            assert_eq!(record.talker, Talker::Gps);
            assert_eq!(record.sentence_type, SentenceType::RMC);
            let Payload::Rmc(rmc) = &record.payload else {
                panic!("expected RMC payload");
            };
            assert_eq!(rmc.time.hours, 12);
            assert_eq!(rmc.time.minutes, 35);
            assert_eq!(rmc.time.seconds, 19);
            assert!(rmc.status_valid);
            assert_eq!(rmc.latitude.hemisphere, b'N');
            assert_eq!(rmc.longitude.hemisphere, b'E');
            assert_eq!(rmc.date.year_yy, 94);
        },
        |_, _, _| panic!("unexpected decode error"),
    );
    assert_eq!(seen, 1);
}

/// Scenario 2: GGA fix-quality/satellite-count/dop/altitude fields.
#[test]
fn scenario_2_gga_fix_fields() {
    let mut parser: DefaultParser = Parser::new();
    parser
        .feed(
            b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,47.0,M,,*4F\r\n",
            PushMode::Atomic,
        )
        .unwrap();

    let mut seen = 0;
    parser.work(
        |record, _stats| {
            seen += 1;
            let Payload::Gga(gga) = &record.payload else {
                panic!("expected GGA payload");
            };
            assert_eq!(gga.fix_quality, 1);
            assert_eq!(gga.satellites_used, 8);
        },
        |_, _, _| panic!("unexpected decode error"),
    );
    assert_eq!(seen, 1);
}

/// Scenario 3: a corrupted checksum produces zero parse callbacks and bumps
/// `checksum_errors`, not `parse_errors`.
#[test]
fn scenario_3_bad_checksum_is_silently_counted() {
    let mut parser: DefaultParser = Parser::new();
    parser
        .feed(
            b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*FF\r\n",
            PushMode::Atomic,
        )
        .unwrap();

    parser.work(
        |_, _| panic!("a checksum mismatch must not decode"),
        |_, _, _| {},
    );
    let stats = parser.stats();
    assert_eq!(stats.sentences_parsed, 0);
    assert_eq!(stats.checksum_errors, 1);
}

/// Scenario 4: a ZDA's century backfills the two-digit year carried by a
/// later RMC in the same stream.
#[test]
fn scenario_4_zda_backfills_rmc_century() {
    let mut parser: DefaultParser = Parser::new();
    parser
        .feed(
            b"$GPZDA,120000.00,15,01,2025,00,00*65\r\n\
              $GPRMC,120001,A,4807.038,N,01131.000,E,022.4,084.4,150125,003.1,W*68\r\n",
            PushMode::Atomic,
        )
        .unwrap();

    let mut rmc_year = None;
    parser.work(
        |record, _| {
            if let Payload::Rmc(rmc) = &record.payload {
                rmc_year = Some(rmc.date.year);
            }
        },
        |_, _, _| panic!("unexpected decode error"),
    );
    assert_eq!(rmc_year, Some(2025));
}

/// Scenario 5: a garbage prefix containing non-ASCII bytes and no `$`/`!`
/// never starts a false sentence, so `parse_errors` stays at zero.
#[test]
fn scenario_5_garbage_prefix_does_not_start_a_false_sentence() {
    let mut parser: DefaultParser = Parser::new();
    let mut data = b"garbage\xff\xfe".to_vec();
    data.extend_from_slice(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,47.0,M,,*4F\r\n");
    parser.feed(&data, PushMode::Atomic).unwrap();

    let mut seen = 0;
    parser.work(|_, _| seen += 1, |_, _, _| panic!("unexpected decode error"));
    assert_eq!(seen, 1);
    assert_eq!(parser.stats().parse_errors, 0);
    assert_eq!(parser.stats().sentences_parsed, 1);
}

/// Chunking is irrelevant: the same RMC fed one byte at a time still produces
/// exactly one callback with identical fields to feeding it whole.
#[test]
fn chunked_feed_is_equivalent_to_feeding_whole() {
    let sentence = b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";

    let mut whole: DefaultParser = Parser::new();
    whole.feed(sentence, PushMode::Atomic).unwrap();
    let mut whole_record = None;
    whole.work(|record, _| whole_record = Some(record.clone()), |_, _, _| {});

    let mut chunked: DefaultParser = Parser::new();
    for byte in sentence {
        chunked.feed(&[*byte], PushMode::Atomic).unwrap();
    }
    let mut chunked_record = None;
    chunked.work(|record, _| chunked_record = Some(record.clone()), |_, _, _| {});

    assert_eq!(whole_record, chunked_record);
    assert!(whole_record.is_some());
}

/// A valid sentence, garbage, then another valid sentence: exactly two
/// callbacks fire, one per sentence.
#[test]
fn garbage_between_two_valid_sentences_fires_two_callbacks() {
    let mut parser: DefaultParser = Parser::new();
    parser
        .feed(
            b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,47.0,M,,*4F\r\nNOT NMEA AT ALL\r\n$GPVTG,360.0,T,348.7,M,000.0,N,000.0,K*43\r\n",
            PushMode::Atomic,
        )
        .unwrap();

    let mut seen = 0;
    parser.work(|_, _| seen += 1, |_, _, _| {});
    assert_eq!(seen, 2);
}

/// `feed` reports `BufferFull` once the ring has no room left, while still
/// queuing whatever fit.
#[test]
fn feed_reports_buffer_full_once_ring_saturates() {
    let mut parser: Parser<82, 16> = Parser::new();
    assert_eq!(parser.feed(b"0123456789012345", PushMode::Atomic), Err(Error::BufferFull));
}

/// Scenario 6: a complete GSV cycle fires the view callback once on the final
/// sentence, and a GSA whose PRNs overlap a prior GSA's bitmask fires the
/// active callback with the *prior* burst's contents.
#[cfg(feature = "tracker")]
#[test]
fn scenario_6_gsv_cycle_and_gsa_conflict_fire_tracker_callbacks() {
    use tiny_nmea::{DefaultSatTracker, SatTracker};

    let mut parser: DefaultParser = Parser::new();
    parser
        .feed(
            b"$GPGSV,3,1,11,01,49,196,41,03,71,278,32,06,02,323,27,11,21,196,39*71\r\n\
              $GPGSV,3,2,11,14,39,064,33,18,26,314,,19,12,041,,22,07,184,*7A\r\n\
              $GPGSV,3,3,11,24,56,311,,25,13,129,,32,06,138,*4D\r\n\
              $GPGSA,A,3,01,03,06,11,,,,,,,,,1.8,1.1,1.4*3A\r\n\
              $GPGSA,A,3,01,14,19,22,,,,,,,,,1.8,1.1,1.4*32\r\n",
            PushMode::Atomic,
        )
        .unwrap();

    let mut tracker: DefaultSatTracker = SatTracker::new();
    let mut view_fires = 0;
    let mut active_fires = 0;
    let mut prior_active_prns: Vec<u8> = Vec::new();

    parser.work(
        |record, _| match &record.payload {
            Payload::Gsv(gsv) => {
                tracker.update_gsv(gsv, |_sats, _date, _time| {
                    view_fires += 1;
                });
            }
            Payload::Gsa(gsa) => {
                tracker.update_gsa(gsa, |active, _date, _time| {
                    active_fires += 1;
                    prior_active_prns = active.iter().map(|s| s.prn).collect();
                });
            }
            _ => {}
        },
        |_, _, _| panic!("unexpected decode error"),
    );

    assert_eq!(view_fires, 1);
    assert_eq!(active_fires, 1);
    assert_eq!(prior_active_prns, vec![1u8, 3, 6, 11]);
}
