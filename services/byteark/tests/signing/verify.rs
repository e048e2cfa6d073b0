// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use anyhow::Result;
use arksign_byteark::{ErrorKind, SignOptions, VerifyOptions};
use arksign_core::time::from_timestamp;

use crate::{init_signer, EXPIRE, URL};

#[test]
fn test_verify_freshly_signed_url() -> Result<()> {
    // Default expiry is relative to the real clock.
    let signer = init_signer();
    let signed = signer.sign(URL, 0, &SignOptions::new().with_geo_block("TH"))?;

    assert!(signer.verify(&signed, &VerifyOptions::new())?);
    Ok(())
}

#[test]
fn test_verify_fixture_lifecycle() -> Result<()> {
    let signed = init_signer().sign(
        URL,
        EXPIRE,
        &SignOptions::new()
            .with_path_prefix("/video-objects/QDuxJm02TYqJ/")
            .with_client_ip("103.253.132.65"),
    )?;
    let request = VerifyOptions::new().with_client_ip("103.253.132.65");

    let before = init_signer().with_time(from_timestamp(EXPIRE - 1)?);
    assert!(before.verify(&signed, &request)?);

    let segment = signed.replace("playlist.m3u8", "720p/segment-00001.ts");
    assert!(before.verify(&segment, &request)?);

    let escaped = signed.replace("/video-objects/QDuxJm02TYqJ/playlist.m3u8", "/video-objects/other/playlist.m3u8");
    assert_eq!(
        before.verify(&escaped, &request).unwrap_err().kind(),
        ErrorKind::InvalidSignCondition
    );

    let after = init_signer().with_time(from_timestamp(EXPIRE)?);
    let err = after.verify(&signed, &request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ExpiredSignedUrl);
    assert!(err.is_verification_error());
    Ok(())
}

#[test]
fn test_verify_shared_across_threads() -> Result<()> {
    let signer = init_signer().with_time(from_timestamp(EXPIRE - 60)?);
    let signed = signer.sign(URL, EXPIRE, &SignOptions::new())?;

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| signer.verify(&signed, &VerifyOptions::new())))
            .collect();
        for handle in handles {
            assert!(handle.join().expect("thread must not panic").expect("must verify"));
        }
    });
    Ok(())
}
